use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid authentication token: {0}")]
    InvalidToken(String),

    #[error("auth provider is not configured")]
    NotConfigured,

    #[error("auth provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AuthError {
    /// Human-readable message from a provider error body, if one was returned.
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Provider { message, .. } => Some(message),
            _ => None,
        }
    }
}
