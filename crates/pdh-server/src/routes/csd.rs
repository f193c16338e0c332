use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use pdh_core::entities::CsdItem;
use pdh_core::requests::{CsdItemCreate, CsdReorder};
use pdh_core::responses::ItemList;
use pdh_db::updates::csd::CsdItemUpdate;

use crate::error::ApiError;
use crate::extract::{ApiJson, CurrentUser, Valid, require_same_id};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects/{project_id}/csd_items", get(list))
        .route("/api/projects/{project_id}/csd", post(create))
        .route("/api/projects/{project_id}/csd/reorder", put(reorder))
        .route(
            "/api/projects/{project_id}/csd/{item_id}",
            get(fetch).patch(update).delete(remove),
        )
}

async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<ItemList<CsdItem>>, ApiError> {
    let items = state.service.list_csd_items(user.id(), &project_id).await?;
    Ok(Json(items.into()))
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<CsdItemCreate>,
) -> Result<(StatusCode, Json<CsdItem>), ApiError> {
    require_same_id(
        &project_id,
        &body.project_id,
        "Project ID in path must match project ID in request body",
    )?;
    let item = state.service.create_csd_item(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn fetch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
) -> Result<Json<CsdItem>, ApiError> {
    Ok(Json(
        state
            .service
            .get_csd_item(user.id(), &project_id, &item_id)
            .await?,
    ))
}

async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
    Valid(body): Valid<CsdItemUpdate>,
) -> Result<Json<CsdItem>, ApiError> {
    Ok(Json(
        state
            .service
            .update_csd_item(user.id(), &project_id, &item_id, &body)
            .await?,
    ))
}

async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_csd_item(user.id(), &project_id, &item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    ApiJson(body): ApiJson<CsdReorder>,
) -> Result<Json<ItemList<CsdItem>>, ApiError> {
    let items = state
        .service
        .reorder_csd_items(user.id(), &project_id, &body)
        .await?;
    Ok(Json(items.into()))
}
