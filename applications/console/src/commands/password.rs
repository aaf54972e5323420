use crate::cli::PasswordCommand;
use crate::error::Result;
use kft_client::{SessionClient, Variant};
use std::io::Write;

pub(super) async fn run<V: Variant>(
    client: &SessionClient<V>,
    cmd: PasswordCommand,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        PasswordCommand::Forgot { email, .. } => {
            let response = client.forgot_password(&email).await?;
            let message = response
                .message
                .unwrap_or_else(|| format!("A reset code was sent to {email}."));
            writeln!(out, "{message}")?;
        }
        PasswordCommand::VerifyOtp { email, code, .. } => {
            let session = client.verify_password_reset_otp(&email, &code).await?;
            if let Some(message) = session.message {
                writeln!(out, "{message}")?;
            }
            writeln!(out, "Reset token: {}", session.reset_session_token)?;
        }
        PasswordCommand::Reset {
            token,
            new,
            confirm,
            ..
        } => {
            let response = client.set_new_password(&token, &new, &confirm).await?;
            let message = response
                .message
                .unwrap_or_else(|| "Password has been reset.".to_string());
            writeln!(out, "{message}")?;
        }
    }
    Ok(())
}
