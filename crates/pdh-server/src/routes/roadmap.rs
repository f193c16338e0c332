use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pdh_core::entities::RoadmapItem;
use pdh_core::requests::RoadmapItemCreate;
use pdh_core::responses::ItemList;
use pdh_db::updates::roadmap::RoadmapItemUpdate;

use crate::error::ApiError;
use crate::extract::{CurrentUser, Valid, require_same_id};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects/{project_id}/roadmap", get(list).post(create))
        .route(
            "/api/projects/{project_id}/roadmap/{item_id}",
            get(fetch).patch(update).delete(remove),
        )
}

async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<ItemList<RoadmapItem>>, ApiError> {
    let items = state
        .service
        .list_roadmap_items(user.id(), &project_id)
        .await?;
    Ok(Json(items.into()))
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<RoadmapItemCreate>,
) -> Result<(StatusCode, Json<RoadmapItem>), ApiError> {
    require_same_id(
        &project_id,
        &body.project_id,
        "Project ID in path must match project ID in request body",
    )?;
    let item = state.service.create_roadmap_item(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn fetch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
) -> Result<Json<RoadmapItem>, ApiError> {
    Ok(Json(
        state
            .service
            .get_roadmap_item(user.id(), &project_id, &item_id)
            .await?,
    ))
}

async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
    Valid(body): Valid<RoadmapItemUpdate>,
) -> Result<Json<RoadmapItem>, ApiError> {
    Ok(Json(
        state
            .service
            .update_roadmap_item(user.id(), &project_id, &item_id, &body)
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
        .delete_roadmap_item(user.id(), &project_id, &item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
