use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::OkrStatus;
use crate::scoring::key_result_progress;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Objective {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: OkrStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Measurable outcome under an objective. Ownership flows through the objective.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KeyResult {
    pub id: String,
    pub objective_id: String,
    pub title: String,
    pub description: Option<String>,
    pub current_value: f64,
    pub target_value: f64,
    pub status: OkrStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeyResult {
    /// Completion percentage, capped at 100.
    #[must_use]
    pub fn progress(&self) -> f64 {
        key_result_progress(self.current_value, self.target_value)
    }
}
