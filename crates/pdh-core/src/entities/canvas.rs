use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{BmcBlock, PvbSection};

/// Product vision board. At most one per project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProductVisionBoard {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub vision: Option<String>,
    pub target_customers: Option<String>,
    pub customer_needs: Option<String>,
    pub product_features: Option<String>,
    pub business_goals: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductVisionBoard {
    /// Text of one section, if filled in.
    #[must_use]
    pub fn section(&self, section: PvbSection) -> Option<&str> {
        match section {
            PvbSection::Vision => self.vision.as_deref(),
            PvbSection::TargetCustomers => self.target_customers.as_deref(),
            PvbSection::CustomerNeeds => self.customer_needs.as_deref(),
            PvbSection::ProductFeatures => self.product_features.as_deref(),
            PvbSection::BusinessGoals => self.business_goals.as_deref(),
        }
    }
}

/// Business model canvas. At most one per project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BusinessModelCanvas {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub key_partners: Option<String>,
    pub key_activities: Option<String>,
    pub key_resources: Option<String>,
    pub value_propositions: Option<String>,
    pub customer_relationships: Option<String>,
    pub channels: Option<String>,
    pub customer_segments: Option<String>,
    pub cost_structure: Option<String>,
    pub revenue_streams: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessModelCanvas {
    #[must_use]
    pub fn block(&self, block: BmcBlock) -> Option<&str> {
        match block {
            BmcBlock::KeyPartners => self.key_partners.as_deref(),
            BmcBlock::KeyActivities => self.key_activities.as_deref(),
            BmcBlock::KeyResources => self.key_resources.as_deref(),
            BmcBlock::ValuePropositions => self.value_propositions.as_deref(),
            BmcBlock::CustomerRelationships => self.customer_relationships.as_deref(),
            BmcBlock::Channels => self.channels.as_deref(),
            BmcBlock::CustomerSegments => self.customer_segments.as_deref(),
            BmcBlock::CostStructure => self.cost_structure.as_deref(),
            BmcBlock::RevenueStreams => self.revenue_streams.as_deref(),
        }
    }
}

/// A sticky note placed in one canvas block.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CanvasItem {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub block: BmcBlock,
    pub content: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
