use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// The request is missing an input its prompt type needs.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("AI provider is not configured (set PDH_AI__API_KEY)")]
    NotConfigured,

    #[error("AI provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("AI response contained no message content")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Whether the caller sent something unusable, as opposed to a
    /// downstream failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
