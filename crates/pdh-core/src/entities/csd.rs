use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CsdCategory;

/// A sticky note in the CSD matrix.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CsdItem {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub category: CsdCategory,
    pub text: String,
    /// Position inside its category column.
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
