//! Typed links between framework items, and lookups by item type tag.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use pdh_core::entities::{FrameworkLink, ItemResponse};
use pdh_core::enums::ItemType;
use pdh_core::requests::FrameworkLinkCreate;
use pdh_core::responses::LinkedItems;
use pdh_db::error::DatabaseError;

use crate::error::ApiError;
use crate::extract::{CurrentUser, Valid};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/links", post(create))
        .route("/api/links/{link_id}", delete(remove))
        .route("/api/items/{item_type}/{item_id}", get(fetch_item))
        .route("/api/items/{item_type}/{item_id}/links", get(linked_items))
}

fn parse_item_type(tag: &str) -> Result<ItemType, ApiError> {
    tag.parse()
        .map_err(|_| ApiError::bad_request(format!("Unsupported item type: {tag}")))
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Valid(body): Valid<FrameworkLinkCreate>,
) -> Result<(StatusCode, Json<FrameworkLink>), ApiError> {
    let link = state.service.create_link(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(link_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_link(user.id(), &link_id)
        .await
        .map_err(|e| match e {
            DatabaseError::NotFound { .. } => {
                ApiError::not_found("Link not found or you don't have permission to delete it")
            }
            other => other.into(),
        })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((item_type, item_id)): Path<(String, String)>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item_type = parse_item_type(&item_type)?;
    Ok(Json(
        state
            .service
            .get_item(user.id(), item_type, &item_id)
            .await?,
    ))
}

async fn linked_items(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((item_type, item_id)): Path<(String, String)>,
) -> Result<Json<LinkedItems>, ApiError> {
    let item_type = parse_item_type(&item_type)?;
    let items = state
        .service
        .list_linked_items(user.id(), item_type, &item_id)
        .await?;
    Ok(Json(items.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_type_tags_parse() {
        assert_eq!(parse_item_type("okr_key_result").unwrap(), ItemType::OkrKeyResult);
        let err = parse_item_type("bmc_item").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported item type: bmc_item");
    }
}
