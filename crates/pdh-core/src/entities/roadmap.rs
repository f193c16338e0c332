use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Priority, Quarter, RoadmapStatus, Timeframe};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoadmapItem {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub name: String,
    /// Mirror of `name` for board clients that edit the card text directly.
    pub content: String,
    pub description: Option<String>,
    pub quarter: Quarter,
    pub year: i64,
    pub status: RoadmapStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub priority: Priority,
    pub timeframe: Timeframe,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
