use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ItemType;

/// Typed edge between two framework items. Endpoints are polymorphic:
/// `(item_type, item_id)` resolves to a row in the table for that type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FrameworkLink {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub source_item_id: String,
    pub source_item_type: ItemType,
    pub target_item_id: String,
    pub target_item_type: ItemType,
    pub link_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Compact view of an item on the other end of a link.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkedItemSnippet {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub content: String,
    pub name: Option<String>,
}

/// Uniform view of any linkable framework item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub content: String,
    pub name: Option<String>,
    pub project_id: String,
}
