/// Console error types
use kft_client::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A protected command ran without a stored session.
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("You cannot delete your own account from this interface.")]
    SelfDelete,

    #[error("Email not found for OTP verification. Please start signup again.")]
    MissingSignupEmail,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// True when the stored session is no longer usable and was dropped.
    pub fn requires_login(&self) -> bool {
        match self {
            ConsoleError::NotLoggedIn => true,
            ConsoleError::Client(e) => e.requires_login(),
            _ => false,
        }
    }
}
