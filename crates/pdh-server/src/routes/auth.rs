use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use pdh_auth::AuthError;
use pdh_auth::provider::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use pdh_core::identity::AuthIdentity;

use crate::error::ApiError;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
}

fn provider_message(error: &AuthError, fallback: &str) -> String {
    error.provider_message().unwrap_or(fallback).to_string()
}

async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state
        .auth_provider()?
        .login(&body)
        .await
        .map_err(|e| match e {
            AuthError::Provider { .. } => {
                ApiError::Unauthorized(provider_message(&e, "Invalid email or password"))
            }
            other => other.into(),
        })?;
    tracing::info!(user_id = %response.user.id, "login succeeded");
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let response = state
        .auth_provider()?
        .register(&body)
        .await
        .map_err(|e| match e {
            AuthError::Provider { .. } => {
                ApiError::BadRequest(provider_message(&e, "Registration failed"))
            }
            other => other.into(),
        })?;
    tracing::info!(user_id = %response.user.id, "user registered");
    Ok(Json(response))
}

async fn me(CurrentUser(identity): CurrentUser) -> Json<AuthIdentity> {
    Json(identity)
}
