use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use pdh_core::entities::{KeyResult, Objective};
use pdh_core::requests::{KeyResultCreate, ObjectiveCreate};
use pdh_core::responses::ObjectiveList;
use pdh_db::updates::okr::{KeyResultUpdate, ObjectiveUpdate};

use crate::error::ApiError;
use crate::extract::{CurrentUser, Valid, require_same_id};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects/{project_id}/okr", get(list))
        .route(
            "/api/projects/{project_id}/okr/objectives",
            post(create_objective),
        )
        .route(
            "/api/projects/{project_id}/okr/objectives/{objective_id}",
            patch(update_objective).delete(remove_objective),
        )
        .route(
            "/api/projects/{project_id}/okr/objectives/{objective_id}/key-results",
            post(create_key_result),
        )
        .route(
            "/api/projects/{project_id}/okr/key-results/{key_result_id}",
            patch(update_key_result).delete(remove_key_result),
        )
}

async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<ObjectiveList>, ApiError> {
    let objectives = state.service.list_okr(user.id(), &project_id).await?;
    Ok(Json(ObjectiveList { objectives }))
}

async fn create_objective(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<ObjectiveCreate>,
) -> Result<(StatusCode, Json<Objective>), ApiError> {
    require_same_id(
        &project_id,
        &body.project_id,
        "Project ID in path must match project ID in request body",
    )?;
    let objective = state.service.create_objective(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(objective)))
}

async fn update_objective(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, objective_id)): Path<(String, String)>,
    Valid(body): Valid<ObjectiveUpdate>,
) -> Result<Json<Objective>, ApiError> {
    Ok(Json(
        state
            .service
            .update_objective(user.id(), &project_id, &objective_id, &body)
            .await?,
    ))
}

async fn remove_objective(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, objective_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_objective(user.id(), &project_id, &objective_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_key_result(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, objective_id)): Path<(String, String)>,
    Valid(body): Valid<KeyResultCreate>,
) -> Result<(StatusCode, Json<KeyResult>), ApiError> {
    require_same_id(
        &objective_id,
        &body.objective_id,
        "Objective ID in path must match objective ID in request body",
    )?;
    let key_result = state
        .service
        .create_key_result(user.id(), &project_id, &body)
        .await?;
    Ok((StatusCode::CREATED, Json(key_result)))
}

async fn update_key_result(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, key_result_id)): Path<(String, String)>,
    Valid(body): Valid<KeyResultUpdate>,
) -> Result<Json<KeyResult>, ApiError> {
    Ok(Json(
        state
            .service
            .update_key_result(user.id(), &project_id, &key_result_id, &body)
            .await?,
    ))
}

async fn remove_key_result(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, key_result_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_key_result(user.id(), &project_id, &key_result_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
