//! Product vision board and business model canvas (one of each per project),
//! plus the sticky items placed on canvas blocks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pdh_core::entities::{BusinessModelCanvas, CanvasItem, ProductVisionBoard};
use pdh_core::requests::{CanvasItemCreate, ModelCanvasCreate, VisionBoardCreate};
use pdh_core::responses::ItemList;
use pdh_db::updates::canvas::{CanvasItemUpdate, ModelCanvasUpdate, VisionBoardUpdate};

use crate::error::ApiError;
use crate::extract::{CurrentUser, Valid, require_same_id};
use crate::state::AppState;

const PATH_BODY_MISMATCH: &str = "Project ID in path must match project ID in request body";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/projects/{project_id}/pvb",
            get(fetch_vision_board)
                .post(create_vision_board)
                .patch(update_vision_board),
        )
        .route(
            "/api/projects/{project_id}/bmc",
            get(fetch_model_canvas)
                .post(create_model_canvas)
                .patch(update_model_canvas),
        )
        .route(
            "/api/projects/{project_id}/bmc-items",
            get(list_items).post(create_item),
        )
        .route(
            "/api/projects/{project_id}/bmc-items/{item_id}",
            get(fetch_item).patch(update_item).delete(remove_item),
        )
}

async fn fetch_vision_board(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<ProductVisionBoard>, ApiError> {
    Ok(Json(
        state
            .service
            .get_vision_board(user.id(), &project_id)
            .await?,
    ))
}

async fn create_vision_board(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<VisionBoardCreate>,
) -> Result<(StatusCode, Json<ProductVisionBoard>), ApiError> {
    require_same_id(&project_id, &body.project_id, PATH_BODY_MISMATCH)?;
    let board = state.service.create_vision_board(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

async fn update_vision_board(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<VisionBoardUpdate>,
) -> Result<Json<ProductVisionBoard>, ApiError> {
    Ok(Json(
        state
            .service
            .update_vision_board(user.id(), &project_id, &body)
            .await?,
    ))
}

async fn fetch_model_canvas(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<BusinessModelCanvas>, ApiError> {
    Ok(Json(
        state
            .service
            .get_model_canvas(user.id(), &project_id)
            .await?,
    ))
}

async fn create_model_canvas(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<ModelCanvasCreate>,
) -> Result<(StatusCode, Json<BusinessModelCanvas>), ApiError> {
    require_same_id(&project_id, &body.project_id, PATH_BODY_MISMATCH)?;
    let canvas = state.service.create_model_canvas(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(canvas)))
}

async fn update_model_canvas(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<ModelCanvasUpdate>,
) -> Result<Json<BusinessModelCanvas>, ApiError> {
    Ok(Json(
        state
            .service
            .update_model_canvas(user.id(), &project_id, &body)
            .await?,
    ))
}

async fn list_items(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<ItemList<CanvasItem>>, ApiError> {
    let items = state.service.list_canvas_items(user.id(), &project_id).await?;
    Ok(Json(items.into()))
}

async fn create_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<CanvasItemCreate>,
) -> Result<(StatusCode, Json<CanvasItem>), ApiError> {
    let item = state
        .service
        .create_canvas_item(user.id(), &project_id, &body)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn fetch_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
) -> Result<Json<CanvasItem>, ApiError> {
    Ok(Json(
        state
            .service
            .get_canvas_item(user.id(), &project_id, &item_id)
            .await?,
    ))
}

async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
    Valid(body): Valid<CanvasItemUpdate>,
) -> Result<Json<CanvasItem>, ApiError> {
    Ok(Json(
        state
            .service
            .update_canvas_item(user.id(), &project_id, &item_id, &body)
            .await?,
    ))
}

async fn remove_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_canvas_item(user.id(), &project_id, &item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
