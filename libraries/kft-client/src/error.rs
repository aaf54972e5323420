//! Error types for the KFT session client.

use thiserror::Error;

/// Message used when a failure carries no usable description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred during the API request.";

/// Coarse classification of a failed call, derived from the HTTP status
/// (or from the local precheck / transport layer), never from message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No stored token, or the server answered 401.
    Unauthenticated,
    /// The server answered 403.
    Forbidden,
    /// The server rejected the payload (400, 409, 422 and other 4xx).
    Validation,
    /// The server answered 404.
    NotFound,
    /// The server answered 5xx.
    Server,
    /// Network failure, malformed body, or a local problem.
    Transport,
}

impl ErrorKind {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthenticated,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::Server,
            _ => Self::Validation,
        }
    }
}

/// Errors that can occur when talking to the KFT API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A protected call was attempted without a stored access token.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The server answered with a non-2xx status.
    ///
    /// `message` is the normalized server message and is displayed verbatim.
    #[error("{message}")]
    Http {
        status: u16,
        kind: ErrorKind,
        message: String,
    },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// A success response could not be decoded.
    #[error("{0}")]
    Parse(String),

    /// The configured base URL is unusable.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// The session store rejected a write.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// The error's kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthenticated => ErrorKind::Unauthenticated,
            Self::Http { kind, .. } => *kind,
            Self::Transport(_) | Self::Parse(_) | Self::InvalidUrl(_) | Self::Storage(_) => {
                ErrorKind::Transport
            }
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the caller should drop the session and ask for a new login.
    pub fn requires_login(&self) -> bool {
        self.kind() == ErrorKind::Unauthenticated
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            Self::Transport(UNKNOWN_ERROR_MESSAGE.to_string())
        } else {
            Self::Transport(message)
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
