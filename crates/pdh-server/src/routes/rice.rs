use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use pdh_ai::PromptContext;
use pdh_core::entities::RiceItem;
use pdh_core::requests::RiceItemCreate;
use pdh_core::responses::{ItemList, RiceSuggestionList};
use pdh_db::updates::rice::RiceItemUpdate;

use crate::error::ApiError;
use crate::extract::{CurrentUser, Valid, require_same_id};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects/{project_id}/rice", get(list).post(create))
        .route(
            "/api/projects/{project_id}/rice/{item_id}",
            get(fetch).patch(update).delete(remove),
        )
        .route("/api/projects/{project_id}/generate_rice", post(generate))
}

async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<ItemList<RiceItem>>, ApiError> {
    let items = state.service.list_rice_items(user.id(), &project_id).await?;
    Ok(Json(items.into()))
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<RiceItemCreate>,
) -> Result<(StatusCode, Json<RiceItem>), ApiError> {
    require_same_id(
        &project_id,
        &body.project_id,
        "Project ID in path must match project ID in request body",
    )?;
    let item = state.service.create_rice_item(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn fetch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
) -> Result<Json<RiceItem>, ApiError> {
    Ok(Json(
        state
            .service
            .get_rice_item(user.id(), &project_id, &item_id)
            .await?,
    ))
}

async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(String, String)>,
    Valid(body): Valid<RiceItemUpdate>,
) -> Result<Json<RiceItem>, ApiError> {
    Ok(Json(
        state
            .service
            .update_rice_item(user.id(), &project_id, &item_id, &body)
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
        .delete_rice_item(user.id(), &project_id, &item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unsaved feature ideas scored by the model, seeded with the project
/// description and the names already on the board.
async fn generate(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<RiceSuggestionList>, ApiError> {
    let project = state.service.require_project(user.id(), &project_id).await?;
    let existing = state
        .service
        .list_rice_items(user.id(), &project_id)
        .await?
        .into_iter()
        .map(|item| item.name)
        .collect();
    let ctx = PromptContext {
        project_name: &project.name,
        context: project.description.as_deref(),
        existing,
    };
    let suggestions = state.suggester()?.rice_ideas(&ctx).await?;
    tracing::info!(%project_id, count = suggestions.len(), "RICE ideas generated");
    Ok(Json(RiceSuggestionList { suggestions }))
}
