//! Types for KFT API requests and responses.
//!
//! Monetary values (`price`, `amount`, `balance`) stay decimal strings on the
//! wire and in memory. They are only parsed when formatted for display.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Users
// =============================================================================

/// A user as returned with a merchant session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A user as seen by the admin portal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl AdminUser {
    /// Role column text: "Superuser", "Staff", the role name, or "User" when
    /// none of those apply.
    pub fn role_label(&self) -> String {
        let mut parts = Vec::new();
        if self.is_superuser == Some(true) {
            parts.push("Superuser");
        }
        if self.is_staff == Some(true) {
            parts.push("Staff");
        }
        if let Some(role) = self.role.as_deref().filter(|r| !r.is_empty()) {
            parts.push(role);
        }
        if parts.is_empty() {
            "User".to_string()
        } else {
            parts.join(" ")
        }
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from login and OTP verification.
///
/// Every field is optional; the session is only stored when `access`,
/// `refresh` and `user` are all present. Unrecognized fields are kept in
/// `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse<U> {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    pub user: Option<U>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl<U> AuthResponse<U> {
    /// The complete session triple, if the response carries one.
    pub fn session(&self) -> Option<(&str, &str, &U)> {
        match (&self.access, &self.refresh, &self.user) {
            (Some(access), Some(refresh), Some(user)) => {
                Some((access.as_str(), refresh.as_str(), user))
            }
            _ => None,
        }
    }
}

/// Merchant registration data.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Registration body actually sent: the signup data plus the role.
#[derive(Debug, Serialize)]
pub(crate) struct SignupPayload<'a> {
    #[serde(flatten)]
    pub data: &'a SignupRequest,
    pub role_type: &'static str,
}

/// Request body for OTP verification (signup and password reset).
#[derive(Debug, Serialize)]
pub(crate) struct OtpRequest<'a> {
    pub email: &'a str,
    pub otp_code: &'a str,
}

/// Plain `{ "message": ... }` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
    pub confirm_new_password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

/// Response from password-reset OTP verification.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetSession {
    #[serde(default)]
    pub message: Option<String>,
    pub reset_session_token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SetNewPasswordRequest<'a> {
    pub reset_session_token: &'a str,
    pub new_password: &'a str,
    pub confirm_new_password: &'a str,
}

// =============================================================================
// Merchant Types
// =============================================================================

/// A product owned by a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "decimal_string")]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Writable product fields, sent on create and on full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
        }
    }
}

/// A merchant balance movement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(deserialize_with = "decimal_string")]
    pub amount: String,
    pub transaction_type: String,
    /// ISO-8601 timestamp
    pub created_at: String,
}

impl Transaction {
    /// True for outgoing movements: negative amounts, payments and fees.
    pub fn is_debit(&self) -> bool {
        let negative = self
            .amount
            .trim()
            .parse::<f64>()
            .map(|v| v < 0.0)
            .unwrap_or(false);
        let kind = self.transaction_type.to_lowercase();
        negative || kind.contains("payment") || kind.contains("fee")
    }

    /// `created_at` rendered as `YYYY-MM-DD HH:MM UTC`, or verbatim when it is
    /// not RFC 3339.
    pub fn created_at_display(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| {
                dt.with_timezone(&chrono::Utc)
                    .format("%Y-%m-%d %H:%M UTC")
                    .to_string()
            })
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// The merchant's own profile, including the current balance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MerchantProfile {
    #[serde(flatten)]
    pub user: UserRecord,
    #[serde(deserialize_with = "decimal_string")]
    pub balance: String,
}

/// Accept a decimal as a JSON string or a JSON number, keeping its text.
///
/// Decimals computed on the server (the profile balance) arrive as numbers;
/// model fields arrive as strings.
fn decimal_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Decimal::deserialize(deserializer)? {
        Decimal::Text(text) => text,
        Decimal::Number(number) => number.to_string(),
    })
}

/// Format a decimal string with two fractional digits. Unparseable input is
/// returned unchanged.
pub fn format_amount(amount: &str) -> String {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{:.2}", value),
        _ => amount.to_string(),
    }
}
