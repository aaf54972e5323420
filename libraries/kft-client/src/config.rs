//! Client configuration.

use crate::error::{ClientError, Result};

/// Base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variables consulted by [`ClientConfig::from_env`], in order.
pub const BASE_URL_ENV_VARS: [&str; 2] = ["KFT_API_BASE_URL", "NEXT_PUBLIC_API_BASE_URL"];

/// Configuration for connecting to the KFT API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8000")
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Build a config from the environment, falling back to
    /// [`DEFAULT_API_BASE_URL`].
    pub fn from_env() -> Self {
        let base_url = BASE_URL_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Validate and normalize the base URL (scheme check, trailing slashes
    /// removed).
    pub(crate) fn normalized_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = trimmed.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;

        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(ClientConfig::default().base_url, "http://localhost:8000");
    }

    #[test]
    fn test_normalization_strips_trailing_slashes() {
        let config = ClientConfig::new("https://api.example.com///");
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(ClientConfig::new("").normalized_base_url().is_err());
        assert!(ClientConfig::new("   ").normalized_base_url().is_err());
        assert!(ClientConfig::new("localhost:8000").normalized_base_url().is_err());
        assert!(ClientConfig::new("ftp://example.com").normalized_base_url().is_err());
        assert!(ClientConfig::new("http://").normalized_base_url().is_err());
    }
}
