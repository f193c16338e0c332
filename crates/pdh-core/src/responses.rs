//! Response envelopes returned as JSON by `pdh-server` handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    KeyResult, LinkedItemSnippet, Objective, Persona, PersonaDetail, Project,
};
use crate::enums::{Priority, Quarter, RoadmapStatus, Timeframe};
use crate::scoring::objective_progress;

/// `GET /api/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectList {
    pub projects: Vec<Project>,
}

/// Generic `{ "items": [...] }` envelope used by CSD, RICE, roadmap, canvas items and links.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonaList {
    pub personas: Vec<Persona>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonaDetailList {
    pub details: Vec<PersonaDetail>,
}

pub type LinkedItems = ItemList<LinkedItemSnippet>;

// ---------------------------------------------------------------------------
// OKR
// ---------------------------------------------------------------------------

/// Key result with its derived progress percentage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KeyResultView {
    #[serde(flatten)]
    pub key_result: KeyResult,
    pub progress: f64,
}

impl From<KeyResult> for KeyResultView {
    fn from(key_result: KeyResult) -> Self {
        let progress = key_result.progress();
        Self {
            key_result,
            progress,
        }
    }
}

/// Objective with its key results and mean progress.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ObjectiveWithKeyResults {
    #[serde(flatten)]
    pub objective: Objective,
    pub key_results: Vec<KeyResultView>,
    pub progress: f64,
}

impl ObjectiveWithKeyResults {
    #[must_use]
    pub fn new(objective: Objective, key_results: Vec<KeyResult>) -> Self {
        let progress = objective_progress(&key_results);
        Self {
            objective,
            key_results: key_results.into_iter().map(KeyResultView::from).collect(),
            progress,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ObjectiveList {
    pub objectives: Vec<ObjectiveWithKeyResults>,
}

// ---------------------------------------------------------------------------
// AI
// ---------------------------------------------------------------------------

/// `POST /api/ai/suggest`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AiSuggestion {
    pub suggestions: Vec<String>,
    pub reasoning: Option<String>,
}

/// A RICE feature proposed by the model, not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RiceSuggestion {
    /// Client-side placeholder id (`temp_<n>`).
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub reach_score: i64,
    pub impact_score: i64,
    pub confidence_score: i64,
    pub effort_score: i64,
    pub rice_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RiceSuggestionList {
    pub suggestions: Vec<RiceSuggestion>,
}

/// Draft roadmap card offered by `POST /api/ai/roadmap-suggestions`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoadmapSuggestion {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub name: String,
    pub content: String,
    pub description: String,
    pub timeframe: Timeframe,
    pub priority: Priority,
    pub quarter: Quarter,
    pub year: i64,
    pub status: RoadmapStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoadmapSuggestionList {
    pub suggestions: Vec<RoadmapSuggestion>,
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UploadResponse {
    pub file_url: String,
}
