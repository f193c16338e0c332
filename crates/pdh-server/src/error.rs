//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"detail": "..."}` with the status
//! picked by [`ApiError::status_code`].

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use pdh_ai::AiError;
use pdh_auth::AuthError;
use pdh_core::errors::CoreError;
use pdh_db::error::DatabaseError;
use pdh_report::ReportError;
use pdh_storage::StorageError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, failed validation, constraint violation, or a path and
    /// body that disagree.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, expired, or unverifiable bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// Unknown id, or a row owned by someone else.
    #[error("{0}")]
    NotFound(String),

    /// Downstream failure. The message is passed through to the client.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Internal(detail) => tracing::error!(%detail, "request failed"),
            other => tracing::debug!(status = status.as_u16(), detail = %other, "request rejected"),
        }
        let unauthorized = matches!(self, Self::Unauthorized(_));
        let mut response = (status, Json(json!({ "detail": self.to_string() }))).into_response();
        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { .. } | DatabaseError::OutsideProject(_) => {
                Self::NotFound(error.to_string())
            }
            DatabaseError::Constraint(_) | DatabaseError::Validation(_) => {
                Self::BadRequest(error.to_string())
            }
            other => Self::Internal(format!("Database error: {other}")),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::BadRequest(message),
            CoreError::NotFound { .. } => Self::NotFound(error.to_string()),
            CoreError::Other(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingToken | AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                Self::Unauthorized(error.to_string())
            }
            AuthError::Provider { .. } => Self::Unauthorized(
                error
                    .provider_message()
                    .unwrap_or("Authentication failed")
                    .to_string(),
            ),
            AuthError::NotConfigured | AuthError::Http(_) => Self::Internal(error.to_string()),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(error: AiError) -> Self {
        if error.is_client_error() {
            Self::BadRequest(error.to_string())
        } else {
            Self::Internal(format!("Failed to generate AI suggestions: {error}"))
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        if error.is_client_error() {
            Self::BadRequest(error.to_string())
        } else {
            Self::Internal(format!("An error occurred during file upload: {error}"))
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(error: ReportError) -> Self {
        Self::Internal(format!("Failed to generate report: {error}"))
    }
}
