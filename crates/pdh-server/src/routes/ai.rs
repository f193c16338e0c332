//! AI suggestion endpoints. Each prompt type fetches its own context, then
//! makes one call through the [`Suggester`](pdh_ai::Suggester).

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use pdh_ai::roadmap::{BoardRequest, board_suggestions, current_year, fallback_lines};
use pdh_ai::{PromptContext, SuggestionTarget};
use pdh_core::requests::{AiPromptRequest, RoadmapSuggestionRequest};
use pdh_core::responses::{AiSuggestion, RoadmapSuggestionList};

use crate::error::ApiError;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ai/suggest", post(suggest))
        .route("/api/ai/roadmap-suggestions", post(roadmap_suggestions))
}

/// Existing entries the prompt should not repeat.
async fn existing_for(
    state: &AppState,
    user_id: &str,
    project_id: &str,
    target: &SuggestionTarget,
) -> Result<Vec<String>, ApiError> {
    let service = &state.service;
    let existing = match target {
        SuggestionTarget::Csd(category) => service
            .list_csd_items(user_id, project_id)
            .await?
            .into_iter()
            .filter(|item| item.category == *category)
            .map(|item| item.text)
            .collect(),
        SuggestionTarget::Rice => service
            .list_rice_items(user_id, project_id)
            .await?
            .into_iter()
            .map(|item| item.name)
            .collect(),
        SuggestionTarget::Roadmap(_) => service
            .list_roadmap_items(user_id, project_id)
            .await?
            .into_iter()
            .map(|item| item.name)
            .collect(),
        SuggestionTarget::Objectives => service
            .list_okr(user_id, project_id)
            .await?
            .into_iter()
            .map(|entry| entry.objective.title)
            .collect(),
        SuggestionTarget::VisionBoard(_)
        | SuggestionTarget::ModelCanvas(_)
        | SuggestionTarget::KeyResults { .. }
        | SuggestionTarget::Persona(_) => Vec::new(),
    };
    Ok(existing)
}

async fn suggest(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(body): ApiJson<AiPromptRequest>,
) -> Result<Json<AiSuggestion>, ApiError> {
    let project = state
        .service
        .require_project(user.id(), &body.project_id)
        .await?;
    let target = SuggestionTarget::from_request(&body)?;
    let existing = existing_for(&state, user.id(), &project.id, &target).await?;
    let ctx = PromptContext {
        project_name: &project.name,
        context: body.context.as_deref(),
        existing,
    };
    tracing::debug!(prompt_type = %body.prompt_type, project_id = %project.id, "AI suggestion requested");

    let suggestion = match (state.suggester(), &target) {
        (Ok(suggester), _) => suggester.suggest(&target, &ctx).await?,
        (Err(error), SuggestionTarget::Roadmap(category)) => {
            tracing::warn!(%error, "roadmap suggestion without AI provider, using fallback");
            AiSuggestion {
                suggestions: fallback_lines(category, &project.name),
                reasoning: Some(
                    "Generated using fallback mechanism due to AI service error.".to_string(),
                ),
            }
        }
        (Err(error), _) => return Err(error.into()),
    };
    Ok(Json(suggestion))
}

/// Three draft cards for one board column. Deterministic; no model call.
async fn roadmap_suggestions(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(body): ApiJson<RoadmapSuggestionRequest>,
) -> Result<Json<RoadmapSuggestionList>, ApiError> {
    let project = state
        .service
        .require_project(user.id(), &body.project_id)
        .await?;
    let existing_count = state
        .service
        .count_roadmap_items(user.id(), &project.id)
        .await?;
    let suggestions = board_suggestions(&BoardRequest {
        project_id: &project.id,
        project_name: &project.name,
        user_id: user.id(),
        category: body.category.as_deref(),
        view_mode: body.view_mode.as_deref(),
        existing_count: usize::try_from(existing_count).unwrap_or_default(),
        year: current_year(),
    })?;
    Ok(Json(RoadmapSuggestionList { suggestions }))
}
