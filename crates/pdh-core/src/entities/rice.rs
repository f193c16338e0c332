use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A feature scored by Reach, Impact, Confidence, and Effort.
///
/// `rice_score` is derived: see [`crate::scoring::rice_score`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RiceItem {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub reach_score: i64,
    pub impact_score: i64,
    pub confidence_score: i64,
    pub effort_score: i64,
    pub rice_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
