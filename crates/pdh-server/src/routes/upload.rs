use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use pdh_core::responses::UploadResponse;
use pdh_storage::PhotoUpload;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload/persona-photo", post(persona_photo))
}

async fn read_photo(mut multipart: Multipart) -> Result<PhotoUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        return Ok(PhotoUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(ApiError::bad_request("No file provided"))
}

async fn persona_photo(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let photo = read_photo(multipart).await?;
    photo.validate(state.server.max_upload_bytes)?;
    let file_url = state.storage()?.upload_photo(user.id(), photo).await?;
    Ok(Json(UploadResponse { file_url }))
}
