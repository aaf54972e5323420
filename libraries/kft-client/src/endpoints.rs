//! API endpoint paths, relative to the base URL.

pub const LOGIN: &str = "/api/auth/token/";
pub const USERS: &str = "/api/auth/users/";
pub const VERIFY_OTP: &str = "/api/auth/users/verify-otp/";
pub const CHANGE_PASSWORD: &str = "/api/auth/users/change-password/";
pub const FORGOT_PASSWORD: &str = "/api/auth/users/forgot-password/";
pub const VERIFY_PASSWORD_RESET_OTP: &str = "/api/auth/users/verify-password-reset-otp/";
pub const SET_NEW_PASSWORD: &str = "/api/auth/users/set-new-password/";

pub const MERCHANT_PRODUCTS: &str = "/api/merchant/products/";
pub const MERCHANT_OWN_PRODUCTS: &str = "/api/merchant/my-products/";
pub const MERCHANT_TRANSACTIONS: &str = "/api/merchant/transactions/";
pub const MERCHANT_PROFILE: &str = "/api/merchant/profile/";

pub fn merchant_product(id: i64) -> String {
    format!("/api/merchant/products/{}/", id)
}

pub fn admin_delete_user(id: i64) -> String {
    format!("/api/kft_admin/users/{}/delete/", id)
}
