//! Merchant portal operations.

use crate::client::SessionClient;
use crate::endpoints;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::types::{
    AuthResponse, MerchantProfile, OtpRequest, Product, ProductInput, SignupPayload,
    SignupRequest, Transaction, UserRecord,
};
use crate::variant::Merchant;
use tracing::{debug, info, warn};

/// Session client for the merchant portal.
pub type MerchantClient = SessionClient<Merchant>;

impl SessionClient<Merchant> {
    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a merchant account.
    ///
    /// No session is created; the server emails an OTP instead. On success the
    /// email is kept under [`Merchant::SIGNUP_EMAIL_KEY`] for
    /// [`verify_otp`](Self::verify_otp).
    pub async fn signup(&self, data: &SignupRequest) -> Result<AuthResponse<UserRecord>> {
        debug!(username = %data.username, email = %data.email, "Registering merchant");

        let request = ApiRequest::post(endpoints::USERS).json(&SignupPayload {
            data,
            role_type: Merchant::ROLE_TYPE,
        })?;
        let response: AuthResponse<UserRecord> = self.send(request).await?;

        if let Err(e) = self.store().set(Merchant::SIGNUP_EMAIL_KEY, &data.email) {
            warn!(error = %e, "Failed to remember signup email");
        }
        info!(email = %data.email, "Signup accepted, awaiting OTP");

        Ok(response)
    }

    /// Verify the emailed signup code. A complete session in the response is
    /// stored exactly as [`login`](SessionClient::login) stores it.
    ///
    /// The pending signup email is left in place; callers clear it with
    /// [`clear_signup_email`](Self::clear_signup_email).
    pub async fn verify_otp(&self, email: &str, otp_code: &str) -> Result<AuthResponse<UserRecord>> {
        let request =
            ApiRequest::post(endpoints::VERIFY_OTP).json(&OtpRequest { email, otp_code })?;
        let response: AuthResponse<UserRecord> = self.send(request).await?;

        if self.store_session(&response)? {
            info!(email = %email, "OTP verified, session stored");
        }

        Ok(response)
    }

    /// Email remembered by the last successful signup.
    pub fn pending_signup_email(&self) -> Option<String> {
        self.store()
            .get(Merchant::SIGNUP_EMAIL_KEY)
            .filter(|email| !email.is_empty())
    }

    /// Forget the pending signup email.
    pub fn clear_signup_email(&self) {
        if let Err(e) = self.store().remove(Merchant::SIGNUP_EMAIL_KEY) {
            warn!(error = %e, "Failed to clear signup email");
        }
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Products owned by the logged-in merchant.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let products: Vec<Product> = self
            .send(ApiRequest::get(endpoints::MERCHANT_OWN_PRODUCTS).authenticated())
            .await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// A single product.
    pub async fn get_product(&self, product_id: i64) -> Result<Product> {
        self.send(ApiRequest::get(endpoints::merchant_product(product_id)).authenticated())
            .await
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<Product> {
        let request = ApiRequest::post(endpoints::MERCHANT_PRODUCTS)
            .json(input)?
            .authenticated();
        let product: Product = self.send(request).await?;
        info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replace every writable field of a product.
    pub async fn update_product(&self, product_id: i64, input: &ProductInput) -> Result<Product> {
        let request = ApiRequest::put(endpoints::merchant_product(product_id))
            .json(input)?
            .authenticated();
        let product: Product = self.send(request).await?;
        info!(product_id = product.id, "Product updated");
        Ok(product)
    }

    /// Delete a product. Any success body is ignored.
    pub async fn delete_product(&self, product_id: i64) -> Result<()> {
        self.send_discarding_body(
            ApiRequest::delete(endpoints::merchant_product(product_id)).authenticated(),
        )
        .await?;
        info!(product_id = product_id, "Product deleted");
        Ok(())
    }

    // ========================================================================
    // Balance
    // ========================================================================

    /// The merchant's transactions, newest first as ordered by the server.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.send(ApiRequest::get(endpoints::MERCHANT_TRANSACTIONS).authenticated())
            .await
    }

    /// The merchant's profile, including the current balance.
    pub async fn profile(&self) -> Result<MerchantProfile> {
        self.send(ApiRequest::get(endpoints::MERCHANT_PROFILE).authenticated())
            .await
    }
}
