use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use pdh_core::requests::ReportRequest;

use crate::error::ApiError;
use crate::extract::{CurrentUser, Valid};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/projects/{project_id}/report", post(generate))
}

/// Fetch every selected framework, render, and return the file as an attachment.
async fn generate(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<ReportRequest>,
) -> Result<Response, ApiError> {
    let snapshot = state
        .service
        .report_snapshot(user.id(), &project_id, &body)
        .await?;
    let document = state.reports.build(&snapshot).await?;
    tracing::info!(
        %project_id,
        file = %document.file_name,
        bytes = document.bytes.len(),
        "report generated"
    );
    let disposition = document.content_disposition();
    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
