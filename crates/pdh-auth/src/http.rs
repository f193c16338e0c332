//! Response checks shared by provider calls.

use serde::Deserialize;

use crate::error::AuthError;

/// GoTrue error bodies vary between endpoints; take the first field present.
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ProviderErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

/// Pass successful responses through. Anything else becomes
/// [`AuthError::Provider`] carrying the most specific message available.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProviderErrorBody>(&body)
        .ok()
        .and_then(ProviderErrorBody::into_message)
        .unwrap_or(body);
    Err(AuthError::Provider {
        status: status.as_u16(),
        message,
    })
}
