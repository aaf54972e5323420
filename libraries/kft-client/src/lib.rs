//! KFT Portal Client
//!
//! Session and API client for the KFT admin and merchant portals.
//!
//! # Features
//!
//! - **Session**: login, logout, authentication check, stored user record
//! - **Merchant**: signup with OTP verification, products, transactions, profile
//! - **Admin**: user listing and deletion
//! - **Storage**: pluggable session store (in-memory or file-backed)
//!
//! Every failure is a [`ClientError`] whose [`ErrorKind`] comes from the HTTP
//! status, so callers can react to an expired session without looking at the
//! message text.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use kft_client::{AdminClient, ClientConfig, FileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FileStore::new("session.json"));
//!     let client = AdminClient::new(ClientConfig::from_env(), store)?;
//!
//!     client.login("admin", "password").await?;
//!
//!     match client.list_users().await {
//!         Ok(users) => println!("{} users", users.len()),
//!         Err(e) if e.requires_login() => client.logout(),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod account;
mod admin;
mod client;
mod config;
pub mod endpoints;
mod error;
mod merchant;
mod request;
mod store;
mod types;
mod variant;

pub use admin::AdminClient;
pub use client::SessionClient;
pub use config::{ClientConfig, BASE_URL_ENV_VARS, DEFAULT_API_BASE_URL};
pub use error::{ClientError, ErrorKind, Result, UNKNOWN_ERROR_MESSAGE};
pub use merchant::MerchantClient;
pub use request::{error_message, ApiRequest};
pub use store::{FileStore, MemoryStore, SessionStore};
pub use types::{
    format_amount, AdminUser, AuthResponse, MerchantProfile, MessageResponse,
    PasswordResetSession, Product, ProductInput, SignupRequest, Transaction, UserRecord,
};
pub use variant::{Admin, Merchant, SessionKeys, Variant};

// Re-exported so callers can build header overrides without a direct
// reqwest dependency.
pub use reqwest::header;
pub use reqwest::Method;
