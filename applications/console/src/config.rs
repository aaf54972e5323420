/// Console configuration
use crate::error::{ConsoleError, Result};
use kft_client::{ClientConfig, BASE_URL_ENV_VARS, DEFAULT_API_BASE_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "kft.toml";

/// Environment variable overriding `session.dir`.
pub const SESSION_DIR_ENV: &str = "KFT_SESSION_DIR";

/// Name of the session file inside `session.dir`.
pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Directory holding the session file
    #[serde(default = "default_session_dir")]
    pub dir: PathBuf,
}

impl ConsoleConfig {
    /// Load configuration from file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load configuration from file and the given environment.
    ///
    /// An explicit `path` must exist; the default `kft.toml` is optional.
    /// `KFT_API_BASE_URL` (or `NEXT_PUBLIC_API_BASE_URL`) and
    /// `KFT_SESSION_DIR` win over the file. Other nested keys can be set as
    /// `KFT_<SECTION>__<KEY>`.
    pub fn load_with_env(path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        let base_url = BASE_URL_ENV_VARS
            .iter()
            .find_map(|key| env.get(*key).filter(|v| !v.trim().is_empty()).cloned());
        let session_dir = env.get(SESSION_DIR_ENV).filter(|v| !v.is_empty()).cloned();

        settings = settings
            .add_source(
                config::Environment::with_prefix("KFT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.into_iter().collect())),
            )
            .set_override_option("api.base_url", base_url)
            .and_then(|s| s.set_override_option("session.dir", session_dir))
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        let config = settings
            .build()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConsoleError::Config(e.to_string()))
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, api_url: Option<String>, session_dir: Option<PathBuf>) -> Self {
        if let Some(url) = api_url {
            self.api.base_url = url;
        }
        if let Some(dir) = session_dir {
            self.session.dir = dir;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(ConsoleError::Config(
                "API base URL is required (set KFT_API_BASE_URL or api.base_url)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConsoleError::Config(format!(
                "API base URL must start with http:// or https:// (got {:?})",
                url
            )));
        }
        if self.session.dir.as_os_str().is_empty() {
            return Err(ConsoleError::Config(
                "Session directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.clone())
    }

    pub fn session_file(&self) -> PathBuf {
        self.session.dir.join(SESSION_FILE)
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_session() -> SessionSettings {
    SessionSettings {
        dir: default_session_dir(),
    }
}

fn default_session_dir() -> PathBuf {
    PathBuf::from(".kft")
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            session: default_session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.session_file(), PathBuf::from(".kft/session.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kft.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nbase_url = \"https://file.example.com\"\n\n[session]\ndir = \"/tmp/from-file\"").unwrap();

        let config = ConsoleConfig::load_with_env(Some(&path), HashMap::new()).unwrap();
        assert_eq!(config.api.base_url, "https://file.example.com");
        assert_eq!(config.session.dir, PathBuf::from("/tmp/from-file"));

        let config = ConsoleConfig::load_with_env(
            Some(&path),
            env(&[("KFT_API_BASE_URL", "https://env.example.com")]),
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://env.example.com");
        assert_eq!(config.session.dir, PathBuf::from("/tmp/from-file"));
    }

    #[test]
    fn test_public_base_url_fallback() {
        let config = ConsoleConfig::load_with_env(
            None,
            env(&[
                ("NEXT_PUBLIC_API_BASE_URL", "https://public.example.com"),
                ("KFT_SESSION_DIR", "/var/lib/kft"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://public.example.com");
        assert_eq!(config.session_file(), PathBuf::from("/var/lib/kft/session.json"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConsoleConfig::load_with_env(Some(&dir.path().join("nope.toml")), HashMap::new());
        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }

    #[test]
    fn test_overrides_and_validation() {
        let config = ConsoleConfig::default()
            .with_overrides(Some("ftp://nope".into()), Some(PathBuf::from("/tmp/s")));
        assert_eq!(config.session.dir, PathBuf::from("/tmp/s"));
        assert!(config.validate().is_err());

        let config = ConsoleConfig::default().with_overrides(Some(" ".into()), None);
        assert!(config.validate().is_err());
    }
}
