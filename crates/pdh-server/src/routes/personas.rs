//! Personas under a project, and the detail cards under each persona.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use pdh_core::entities::{ItemResponse, Persona, PersonaDetail};
use pdh_core::requests::{PersonaCreate, PersonaDetailCreate, PersonaDetailReorder};
use pdh_core::responses::{PersonaDetailList, PersonaList};
use pdh_db::updates::persona::{PersonaDetailUpdate, PersonaUpdate};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery, CurrentUser, Valid, require_same_id};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/projects/{project_id}/personas",
            get(list).post(create),
        )
        .route(
            "/api/projects/{project_id}/personas/{persona_id}",
            get(fetch).patch(update).delete(remove),
        )
        .route("/api/personas/details", get(project_details))
        .route(
            "/api/personas/{persona_id}/details",
            get(list_details).post(create_detail),
        )
        .route(
            "/api/personas/{persona_id}/details/reorder",
            put(reorder_details),
        )
        .route(
            "/api/personas/{persona_id}/details/{detail_id}",
            get(fetch_detail).patch(update_detail).delete(remove_detail),
        )
}

async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<PersonaList>, ApiError> {
    let personas = state.service.list_personas(user.id(), &project_id).await?;
    Ok(Json(PersonaList { personas }))
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Valid(body): Valid<PersonaCreate>,
) -> Result<(StatusCode, Json<Persona>), ApiError> {
    require_same_id(
        &project_id,
        &body.project_id,
        "Project ID in path must match project ID in request body",
    )?;
    let persona = state.service.create_persona(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

async fn fetch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, persona_id)): Path<(String, String)>,
) -> Result<Json<Persona>, ApiError> {
    Ok(Json(
        state
            .service
            .get_persona(user.id(), &project_id, &persona_id)
            .await?,
    ))
}

async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, persona_id)): Path<(String, String)>,
    Valid(body): Valid<PersonaUpdate>,
) -> Result<Json<Persona>, ApiError> {
    Ok(Json(
        state
            .service
            .update_persona(user.id(), &project_id, &persona_id, &body)
            .await?,
    ))
}

async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, persona_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_persona(user.id(), &project_id, &persona_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_details(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(persona_id): Path<String>,
) -> Result<Json<PersonaDetailList>, ApiError> {
    let details = state
        .service
        .list_persona_details(user.id(), &persona_id)
        .await?;
    Ok(Json(PersonaDetailList { details }))
}

async fn create_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(persona_id): Path<String>,
    Valid(body): Valid<PersonaDetailCreate>,
) -> Result<(StatusCode, Json<PersonaDetail>), ApiError> {
    require_same_id(
        &persona_id,
        &body.persona_id,
        "Persona ID in path must match persona ID in request body",
    )?;
    let detail = state.service.create_persona_detail(user.id(), &body).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn fetch_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((persona_id, detail_id)): Path<(String, String)>,
) -> Result<Json<PersonaDetail>, ApiError> {
    Ok(Json(
        state
            .service
            .get_persona_detail(user.id(), &persona_id, &detail_id)
            .await?,
    ))
}

async fn update_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((persona_id, detail_id)): Path<(String, String)>,
    Valid(body): Valid<PersonaDetailUpdate>,
) -> Result<Json<PersonaDetail>, ApiError> {
    Ok(Json(
        state
            .service
            .update_persona_detail(user.id(), &persona_id, &detail_id, &body)
            .await?,
    ))
}

async fn remove_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((persona_id, detail_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_persona_detail(user.id(), &persona_id, &detail_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_details(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(persona_id): Path<String>,
    ApiJson(body): ApiJson<PersonaDetailReorder>,
) -> Result<Json<PersonaDetailList>, ApiError> {
    let details = state
        .service
        .reorder_persona_details(user.id(), &persona_id, &body)
        .await?;
    Ok(Json(PersonaDetailList { details }))
}

#[derive(Debug, Deserialize)]
struct ProjectQuery {
    project_id: String,
}

/// Every detail card of a project, shaped like a generic framework item.
async fn project_details(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    Ok(Json(
        state
            .service
            .list_project_persona_details(user.id(), &query.project_id)
            .await?,
    ))
}
