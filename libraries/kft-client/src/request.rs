//! Request description and error-message normalization.

use crate::error::{ClientError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// One API call: endpoint path (joined to the base URL), method, header
/// overrides and an optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) endpoint: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<String>,
    pub(crate) requires_token: bool,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: HeaderMap::new(),
            body: None,
            requires_token: false,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let encoded = serde_json::to_string(body)
            .map_err(|e| ClientError::Parse(format!("Failed to encode request body: {}", e)))?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Override a header. An explicit `Authorization` header suppresses
    /// bearer-token injection.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Fail locally with [`ClientError::NotAuthenticated`] when no access
    /// token is stored, without sending anything.
    pub fn authenticated(mut self) -> Self {
        self.requires_token = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Human-readable message for a failed response.
///
/// Precedence: a usable `detail` (a non-empty string, a comma-joined list of
/// strings, a non-zero number or `true`); otherwise every non-empty string
/// (or string element of a list) among the body's values, in field order,
/// space-joined; otherwise `HTTP error! status: <code>`.
pub fn error_message(status: u16, body: Option<&Value>) -> String {
    let values: Vec<&Value> = match body {
        Some(Value::Object(fields)) => {
            if let Some(detail) = fields.get("detail").and_then(detail_text) {
                return detail;
            }
            fields.values().collect()
        }
        Some(Value::Array(items)) => items.iter().collect(),
        _ => Vec::new(),
    };

    let mut parts: Vec<&str> = Vec::new();
    for value in values {
        match value {
            Value::String(s) if !s.is_empty() => parts.push(s),
            Value::Array(items) => {
                parts.extend(
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|s| !s.is_empty()),
                );
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        format!("HTTP error! status: {}", status)
    } else {
        parts.join(" ")
    }
}

/// `detail` rendered as text: a non-empty string verbatim, a list of strings
/// comma-joined, a non-zero number or `true` as written. Anything else is
/// not a usable detail.
fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_wins() {
        let body = json!({"username": ["taken"], "detail": "Invalid credentials"});
        assert_eq!(error_message(400, Some(&body)), "Invalid credentials");
    }

    #[test]
    fn test_fields_flattened_in_order() {
        let body = json!({
            "username": ["A user with that username already exists."],
            "code": 17,
            "email": ["Enter a valid email address.", "Too long."],
            "hint": "Try again"
        });
        assert_eq!(
            error_message(400, Some(&body)),
            "A user with that username already exists. Enter a valid email address. Too long. Try again"
        );
    }

    #[test]
    fn test_empty_detail_falls_through() {
        let body = json!({"detail": "", "non_field_errors": ["Passwords do not match."]});
        assert_eq!(error_message(400, Some(&body)), "Passwords do not match.");
    }

    #[test]
    fn test_non_string_detail_used_directly() {
        let body = json!({"detail": ["a", "b"], "email": ["ignored"]});
        assert_eq!(error_message(400, Some(&body)), "a,b");

        let body = json!({"detail": [], "email": ["Enter a valid email address."]});
        assert_eq!(error_message(400, Some(&body)), "Enter a valid email address.");

        let body = json!({"detail": {"code": "x"}, "hint": "Try again"});
        assert_eq!(error_message(400, Some(&body)), "Try again");
    }

    #[test]
    fn test_top_level_list() {
        let body = json!(["Product not owned by you."]);
        assert_eq!(error_message(403, Some(&body)), "Product not owned by you.");
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(error_message(500, None), "HTTP error! status: 500");
        assert_eq!(
            error_message(404, Some(&json!({"count": 0}))),
            "HTTP error! status: 404"
        );
        assert_eq!(error_message(502, Some(&json!("bad gateway"))), "HTTP error! status: 502");
    }

    #[test]
    fn test_builder() {
        let request = ApiRequest::put("/api/merchant/products/3/")
            .json(&json!({"name": "Tea"}))
            .unwrap()
            .authenticated();
        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(request.endpoint(), "/api/merchant/products/3/");
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Tea"}"#));
        assert!(request.requires_token);
    }
}
