//! Password login and signup forwarded to the hosted auth platform.

use std::time::Duration;

use pdh_config::AuthConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AuthError;
use crate::http::check_response;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Message returned after a successful signup.
pub const REGISTERED_MESSAGE: &str =
    "Registration successful. Please check your email for verification.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: AuthUser,
}

/// Client for the platform's GoTrue-compatible auth API.
#[derive(Debug, Clone)]
pub struct AuthProviderClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl AuthProviderClient {
    /// # Errors
    ///
    /// [`AuthError::NotConfigured`] without a platform URL and anon key,
    /// [`AuthError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        if !config.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Exchange email and password for an access token.
    ///
    /// # Errors
    ///
    /// [`AuthError::Provider`] when the platform rejects the credentials.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        tracing::debug!(email = %request.email, "forwarding password login");
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": request.email, "password": request.password }))
            .send()
            .await?;
        let body: Value = check_response(resp).await?.json().await?;
        parse_session(&body)
    }

    /// Create an account. The display name is stored in user metadata.
    ///
    /// # Errors
    ///
    /// [`AuthError::Provider`] when the platform refuses the signup.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, AuthError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        tracing::debug!(email = %request.email, "forwarding signup");
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&json!({
                "email": request.email,
                "password": request.password,
                "data": { "name": request.name },
            }))
            .send()
            .await?;
        let body: Value = check_response(resp).await?.json().await?;
        parse_signup(&body, &request.name)
    }
}

fn parse_user(user: &Value) -> Option<AuthUser> {
    let id = user.get("id")?.as_str()?.to_string();
    Some(AuthUser {
        id,
        email: user.get("email").and_then(Value::as_str).map(str::to_string),
        name: user
            .pointer("/user_metadata/name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Map a password-grant response into the API's login shape.
fn parse_session(body: &Value) -> Result<LoginResponse, AuthError> {
    let invalid = || AuthError::Provider {
        status: 401,
        message: "Invalid credentials".into(),
    };
    let access_token = body
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(invalid)?;
    let user = body.get("user").and_then(parse_user).ok_or_else(invalid)?;
    Ok(LoginResponse {
        access_token: access_token.to_string(),
        token_type: "bearer".into(),
        user,
    })
}

/// Signup returns a session wrapping `user` when email confirmation is off,
/// and the bare user object when it is on.
fn parse_signup(body: &Value, name: &str) -> Result<RegisterResponse, AuthError> {
    let user_value = body.get("user").filter(|u| u.is_object()).unwrap_or(body);
    let mut user = parse_user(user_value).ok_or_else(|| AuthError::Provider {
        status: 400,
        message: "Registration failed - no user returned".into(),
    })?;
    user.name = name.to_string();
    Ok(RegisterResponse {
        message: REGISTERED_MESSAGE.into(),
        user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unconfigured_client_is_refused() {
        let err = AuthProviderClient::new(&AuthConfig::default()).unwrap_err();
        assert!(matches!(err, AuthError::NotConfigured));
    }

    #[test]
    fn configured_client_trims_trailing_slash() {
        let client = AuthProviderClient::new(&AuthConfig {
            url: "https://abc.supabase.co/".into(),
            anon_key: "anon".into(),
            ..AuthConfig::default()
        })
        .unwrap();
        assert_eq!(client.base_url, "https://abc.supabase.co");
    }

    #[test]
    fn session_maps_to_login_response() {
        let body = json!({
            "access_token": "jwt.value.sig",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": {
                "id": "u-1",
                "email": "ana@example.com",
                "user_metadata": { "name": "Ana" }
            }
        });
        let login = parse_session(&body).unwrap();
        assert_eq!(
            login,
            LoginResponse {
                access_token: "jwt.value.sig".into(),
                token_type: "bearer".into(),
                user: AuthUser {
                    id: "u-1".into(),
                    email: Some("ana@example.com".into()),
                    name: "Ana".into(),
                },
            }
        );
    }

    #[test]
    fn session_without_token_is_invalid() {
        let err = parse_session(&json!({ "user": { "id": "u-1" } })).unwrap_err();
        assert!(matches!(err, AuthError::Provider { status: 401, .. }));
    }

    #[test]
    fn signup_accepts_bare_user() {
        let body = json!({ "id": "u-2", "email": "bo@example.com", "user_metadata": {} });
        let registered = parse_signup(&body, "Bo").unwrap();
        assert_eq!(registered.user.id, "u-2");
        assert_eq!(registered.user.name, "Bo");
        assert_eq!(registered.message, REGISTERED_MESSAGE);
    }

    #[test]
    fn signup_accepts_session_wrapper() {
        let body = json!({
            "access_token": "t",
            "user": { "id": "u-3", "email": "cy@example.com" }
        });
        assert_eq!(parse_signup(&body, "Cy").unwrap().user.id, "u-3");
    }

    #[test]
    fn signup_without_user_fails() {
        let err = parse_signup(&json!({}), "Dee").unwrap_err();
        assert_eq!(
            err.provider_message(),
            Some("Registration failed - no user returned")
        );
    }
}
