//! Password management, shared by both portals.

use crate::client::SessionClient;
use crate::endpoints;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::types::{
    ChangePasswordRequest, ForgotPasswordRequest, MessageResponse, OtpRequest,
    PasswordResetSession, SetNewPasswordRequest,
};
use crate::variant::Variant;
use tracing::{debug, info};

impl<V: Variant> SessionClient<V> {
    /// Change the logged-in user's password. Requires a stored token.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> Result<MessageResponse> {
        let request = ApiRequest::post(endpoints::CHANGE_PASSWORD)
            .json(&ChangePasswordRequest {
                old_password,
                new_password,
                confirm_new_password,
            })?
            .authenticated();

        let response: MessageResponse = self.send(request).await?;
        info!(portal = V::NAME, "Password changed");
        Ok(response)
    }

    /// Ask the server to email a password-reset code.
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse> {
        debug!(portal = V::NAME, email = %email, "Requesting password reset");
        let request =
            ApiRequest::post(endpoints::FORGOT_PASSWORD).json(&ForgotPasswordRequest { email })?;
        self.send(request).await
    }

    /// Exchange an emailed reset code for a reset session token.
    pub async fn verify_password_reset_otp(
        &self,
        email: &str,
        otp_code: &str,
    ) -> Result<PasswordResetSession> {
        let request = ApiRequest::post(endpoints::VERIFY_PASSWORD_RESET_OTP)
            .json(&OtpRequest { email, otp_code })?;
        self.send(request).await
    }

    /// Set a new password using a reset session token.
    pub async fn set_new_password(
        &self,
        reset_session_token: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> Result<MessageResponse> {
        let request = ApiRequest::post(endpoints::SET_NEW_PASSWORD).json(&SetNewPasswordRequest {
            reset_session_token,
            new_password,
            confirm_new_password,
        })?;

        let response: MessageResponse = self.send(request).await?;
        info!(portal = V::NAME, "Password reset completed");
        Ok(response)
    }
}
