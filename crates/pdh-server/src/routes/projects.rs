use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pdh_core::entities::Project;
use pdh_core::requests::ProjectCreate;
use pdh_core::responses::ProjectList;
use pdh_db::updates::project::ProjectUpdate;

use crate::error::ApiError;
use crate::extract::{CurrentUser, Valid};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list).post(create))
        .route(
            "/api/projects/{project_id}",
            get(fetch).patch(update).delete(remove),
        )
}

async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProjectList>, ApiError> {
    let projects = state.service.list_projects(user.id()).await?;
    Ok(Json(ProjectList { projects }))
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Valid(body): Valid<ProjectCreate>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = state.service.create_project(user.id(), &body).await?;
    tracing::info!(project_id = %project.id, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}

async fn fetch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.service.get_project(user.id(), &project_id).await?))
}

async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<ProjectUpdate>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(
        state
            .service
            .update_project(user.id(), &project_id, &body)
            .await?,
    ))
}

async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_project(user.id(), &project_id).await?;
    tracing::info!(%project_id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}
