//! Portal variants.
//!
//! The admin and merchant portals run the same session client. A [`Variant`]
//! supplies what differs between them: the storage key names and the shape
//! of the stored user record. Resource operations are added per variant in
//! `admin.rs` and `merchant.rs`.

use crate::types::{AdminUser, UserRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Storage keys holding one portal's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
    pub access_token: &'static str,
    pub refresh_token: &'static str,
    pub user: &'static str,
}

impl SessionKeys {
    /// All three keys, in write order.
    pub const fn all(&self) -> [&'static str; 3] {
        [self.access_token, self.refresh_token, self.user]
    }
}

/// Static description of a portal.
pub trait Variant: Send + Sync + 'static {
    /// Stored "current user" record.
    type User: Serialize + DeserializeOwned + Clone + Debug + Send + Sync;

    /// Name used in log fields.
    const NAME: &'static str;

    /// Where the session lives in the store.
    const KEYS: SessionKeys;
}

/// The admin portal.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl Variant for Admin {
    type User = AdminUser;
    const NAME: &'static str = "admin";
    const KEYS: SessionKeys = SessionKeys {
        access_token: "adminAccessToken",
        refresh_token: "adminRefreshToken",
        user: "adminUser",
    };
}

/// The merchant portal.
#[derive(Debug, Clone, Copy)]
pub struct Merchant;

impl Merchant {
    /// Transient key holding the email between signup and OTP verification.
    pub const SIGNUP_EMAIL_KEY: &'static str = "signupEmail";

    /// Role discriminator sent with signup.
    pub const ROLE_TYPE: &'static str = "merchant";
}

impl Variant for Merchant {
    type User = UserRecord;
    const NAME: &'static str = "merchant";
    const KEYS: SessionKeys = SessionKeys {
        access_token: "accessToken",
        refresh_token: "refreshToken",
        user: "user",
    };
}
