use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The uploaded file was rejected before reaching storage.
    #[error("{0}")]
    InvalidUpload(String),

    #[error("Storage is not configured (set PDH_STORAGE__URL and PDH_STORAGE__SERVICE_KEY)")]
    NotConfigured,

    #[error("storage API returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl StorageError {
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidUpload(_))
    }
}
