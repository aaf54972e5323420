//! Session client shared by both portals.

use crate::config::ClientConfig;
use crate::endpoints;
use crate::error::{ClientError, ErrorKind, Result};
use crate::request::{error_message, ApiRequest};
use crate::store::SessionStore;
use crate::types::{AuthResponse, LoginRequest};
use crate::variant::Variant;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Session and API client for one portal.
///
/// Holds the HTTP client, the normalized base URL and the session store. The
/// session itself (tokens and user record) lives only in the store, so two
/// clients over the same store see the same session.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use kft_client::{ClientConfig, MemoryStore, MerchantClient};
///
/// let client = MerchantClient::new(ClientConfig::from_env(), Arc::new(MemoryStore::new()))?;
/// client.login("shop", "password").await?;
/// assert!(client.is_authenticated());
///
/// for product in client.list_products().await? {
///     println!("{} {}", product.name, product.price);
/// }
/// ```
pub struct SessionClient<V: Variant> {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    _variant: PhantomData<fn() -> V>,
}

/// What to do with a success body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyMode {
    Parse,
    Discard,
}

impl<V: Variant> SessionClient<V> {
    /// Create a client over the given store.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = config.normalized_base_url()?;

        let http = Client::builder()
            .user_agent(format!("KftPortal/{} ({})", env!("CARGO_PKG_VERSION"), V::NAME))
            .build()
            .map_err(ClientError::from)?;

        Ok(Self {
            http,
            base_url,
            store,
            _variant: PhantomData,
        })
    }

    /// Normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The backing session store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    // ========================================================================
    // Request primitive
    // ========================================================================

    /// Send a request and decode the success body into `T`.
    ///
    /// A `204 No Content` (or an empty success body) decodes from JSON
    /// `null`, so `()` and `Option<_>` targets accept it.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.execute(request, BodyMode::Parse).await?;
        serde_json::from_value(body.unwrap_or(Value::Null)).map_err(|e| {
            warn!(portal = V::NAME, error = %e, "API response did not match the expected shape");
            ClientError::Parse(e.to_string())
        })
    }

    /// Send a request whose success body is irrelevant. The body is not
    /// parsed, so non-JSON success bodies are accepted.
    pub async fn send_discarding_body(&self, request: ApiRequest) -> Result<()> {
        self.execute(request, BodyMode::Discard).await.map(|_| ())
    }

    async fn execute(&self, request: ApiRequest, mode: BodyMode) -> Result<Option<Value>> {
        let ApiRequest {
            method,
            endpoint,
            mut headers,
            body,
            requires_token,
        } = request;

        let token = self.access_token();
        if requires_token && token.is_none() {
            debug!(portal = V::NAME, endpoint = %endpoint, "No access token stored");
            return Err(ClientError::NotAuthenticated);
        }

        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if !headers.contains_key(AUTHORIZATION) {
            if let Some(token) = token {
                let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                    ClientError::Storage("stored access token is not a valid header value".into())
                })?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        let url = format!("{}{}", self.base_url, endpoint);
        debug!(portal = V::NAME, method = %method, url = %url, "Sending API request");

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(portal = V::NAME, url = %url, error = %e, "API request error");
            ClientError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await.map_err(|e| {
            warn!(portal = V::NAME, url = %url, error = %e, "Failed to read API response");
            ClientError::from(e)
        })?;

        if !status.is_success() {
            let parsed = serde_json::from_str::<Value>(&text).ok();
            let message = error_message(status.as_u16(), parsed.as_ref());
            warn!(
                portal = V::NAME,
                url = %url,
                status = status.as_u16(),
                error = %message,
                "API request failed"
            );
            return Err(ClientError::Http {
                status: status.as_u16(),
                kind: ErrorKind::from_status(status.as_u16()),
                message,
            });
        }

        if mode == BodyMode::Discard || text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text).map(Some).map_err(|e| {
            warn!(portal = V::NAME, url = %url, error = %e, "API response is not valid JSON");
            ClientError::Parse(e.to_string())
        })
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Log in with username and password.
    ///
    /// When the response carries access token, refresh token and user, all
    /// three are stored. The response is returned as received either way.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse<V::User>> {
        debug!(portal = V::NAME, username = %username, "Attempting login");

        let request = ApiRequest::post(endpoints::LOGIN).json(&LoginRequest { username, password })?;
        let response: AuthResponse<V::User> = self.send(request).await?;

        if self.store_session(&response)? {
            info!(portal = V::NAME, username = %username, "Login successful");
        }

        Ok(response)
    }

    /// Store the session carried by an auth response. Returns `false` when the
    /// response does not carry a complete session.
    pub(crate) fn store_session(&self, response: &AuthResponse<V::User>) -> Result<bool> {
        let Some((access, refresh, user)) = response.session() else {
            debug!(portal = V::NAME, "Auth response carries no session");
            return Ok(false);
        };

        let user_json =
            serde_json::to_string(user).map_err(|e| ClientError::Storage(e.to_string()))?;

        let keys = V::KEYS;
        self.store.set(keys.access_token, access)?;
        self.store.set(keys.refresh_token, refresh)?;
        self.store.set(keys.user, &user_json)?;

        Ok(true)
    }

    /// Remove the stored session. Never fails; removal errors are logged.
    pub fn logout(&self) {
        for key in V::KEYS.all() {
            if let Err(e) = self.store.remove(key) {
                warn!(portal = V::NAME, key = key, error = %e, "Failed to remove session entry");
            }
        }
        info!(portal = V::NAME, "Logged out");
    }

    /// Stored access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.store
            .get(V::KEYS.access_token)
            .filter(|token| !token.is_empty())
    }

    /// Stored refresh token, if any. Kept for completeness; never used to
    /// renew the access token.
    pub fn refresh_token(&self) -> Option<String> {
        self.store
            .get(V::KEYS.refresh_token)
            .filter(|token| !token.is_empty())
    }

    /// Stored user record, if present and readable.
    pub fn user(&self) -> Option<V::User> {
        let raw = self.store.get(V::KEYS.user)?;
        serde_json::from_str(&raw)
            .map_err(|e| {
                warn!(portal = V::NAME, error = %e, "Stored user record is unreadable");
            })
            .ok()
    }

    /// True when an access token and a readable user record are stored.
    /// Expiry is not checked.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some() && self.user().is_some()
    }
}

impl<V: Variant> fmt::Debug for SessionClient<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("portal", &V::NAME)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
