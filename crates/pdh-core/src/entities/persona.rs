use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PersonaDetailCategory;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Persona {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub quote: Option<String>,
    pub demographics: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A goal, need, pain point, or motivation on a persona card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonaDetail {
    pub id: String,
    pub persona_id: String,
    pub user_id: String,
    pub category: PersonaDetailCategory,
    pub content: String,
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
