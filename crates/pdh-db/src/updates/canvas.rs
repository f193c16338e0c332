//! Vision board, model canvas, and canvas item updates.

use pdh_core::enums::BmcBlock;
use pdh_core::errors::CoreError;
use pdh_core::requests::CANVAS_FIELD_MAX;
use pdh_core::validate::{Validate, require_length, require_max_length, require_range};
use serde::{Deserialize, Serialize};

use super::double_option;

/// Flatten a double option into the text it would store.
fn stored(value: Option<&Option<String>>) -> Option<&str> {
    value.and_then(Option::as_deref)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisionBoardUpdate {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub vision: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub target_customers: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub customer_needs: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub product_features: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub business_goals: Option<Option<String>>,
}

impl VisionBoardUpdate {
    /// `(column, value)` pairs in schema order.
    pub(crate) fn columns(&self) -> [(&'static str, Option<&Option<String>>); 5] {
        [
            ("vision", self.vision.as_ref()),
            ("target_customers", self.target_customers.as_ref()),
            ("customer_needs", self.customer_needs.as_ref()),
            ("product_features", self.product_features.as_ref()),
            ("business_goals", self.business_goals.as_ref()),
        ]
    }
}

impl Validate for VisionBoardUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        for (column, value) in self.columns() {
            require_max_length(column, stored(value), CANVAS_FIELD_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelCanvasUpdate {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub key_partners: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub key_activities: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub key_resources: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub value_propositions: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub customer_relationships: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub channels: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub customer_segments: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub cost_structure: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub revenue_streams: Option<Option<String>>,
}

impl ModelCanvasUpdate {
    /// `(block, value)` pairs in [`BmcBlock::ALL`] order.
    pub(crate) fn columns(&self) -> [(BmcBlock, Option<&Option<String>>); 9] {
        [
            (BmcBlock::KeyPartners, self.key_partners.as_ref()),
            (BmcBlock::KeyActivities, self.key_activities.as_ref()),
            (BmcBlock::KeyResources, self.key_resources.as_ref()),
            (BmcBlock::ValuePropositions, self.value_propositions.as_ref()),
            (BmcBlock::CustomerRelationships, self.customer_relationships.as_ref()),
            (BmcBlock::Channels, self.channels.as_ref()),
            (BmcBlock::CustomerSegments, self.customer_segments.as_ref()),
            (BmcBlock::CostStructure, self.cost_structure.as_ref()),
            (BmcBlock::RevenueStreams, self.revenue_streams.as_ref()),
        ]
    }
}

impl Validate for ModelCanvasUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        for (block, value) in self.columns() {
            require_max_length(block.as_str(), stored(value), CANVAS_FIELD_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BmcBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl Validate for CanvasItemUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(content) = &self.content {
            require_length("content", content, 1, CANVAS_FIELD_MAX)?;
        }
        if let Some(position) = self.position {
            require_range("position", position, 0, i64::MAX)?;
        }
        Ok(())
    }
}
