//! Create payloads accepted by the HTTP layer.
//!
//! Partial updates live next to their repos in `pdh-db::updates`. Bounds here
//! mirror the `CHECK` constraints in the schema.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{
    BmcBlock, CsdCategory, ItemType, OkrStatus, PersonaDetailCategory, Priority, PromptType,
    Quarter, ReportFramework, RoadmapStatus, Timeframe,
};
use crate::errors::CoreError;
use crate::validate::{
    Validate, require_length, require_max_length, require_positive, require_range,
};

pub const NAME_MAX: usize = 100;
pub const TEXT_MAX: usize = 500;
pub const TITLE_MAX: usize = 200;
pub const CANVAS_FIELD_MAX: usize = 1000;
pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 10;
pub const EFFORT_MIN: i64 = 1;
pub const YEAR_MIN: i64 = 2000;
pub const YEAR_MAX: i64 = 2100;

const fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for ProjectCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("name", &self.name, 1, NAME_MAX)?;
        require_max_length("description", self.description.as_deref(), CANVAS_FIELD_MAX)
    }
}

// ---------------------------------------------------------------------------
// CSD
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CsdItemCreate {
    pub project_id: String,
    pub category: CsdCategory,
    pub text: String,
}

impl Validate for CsdItemCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("text", &self.text, 1, TEXT_MAX)
    }
}

/// Drag-and-drop reorder: ids in their new order, optionally moved to another category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReorderRequest<C> {
    pub item_ids: Vec<String>,
    /// Set when the items were dropped into another column.
    pub new_category: Option<C>,
}

pub type CsdReorder = ReorderRequest<CsdCategory>;
pub type PersonaDetailReorder = ReorderRequest<PersonaDetailCategory>;

// ---------------------------------------------------------------------------
// Personas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonaCreate {
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub demographics: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl Validate for PersonaCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("name", &self.name, 1, NAME_MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonaDetailCreate {
    pub persona_id: String,
    pub category: PersonaDetailCategory,
    pub content: String,
}

impl Validate for PersonaDetailCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("content", &self.content, 1, TEXT_MAX)
    }
}

// ---------------------------------------------------------------------------
// Vision board and model canvas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VisionBoardCreate {
    pub project_id: String,
    #[serde(default)]
    pub vision: Option<String>,
    #[serde(default)]
    pub target_customers: Option<String>,
    #[serde(default)]
    pub customer_needs: Option<String>,
    #[serde(default)]
    pub product_features: Option<String>,
    #[serde(default)]
    pub business_goals: Option<String>,
}

impl Validate for VisionBoardCreate {
    fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("vision", &self.vision),
            ("target_customers", &self.target_customers),
            ("customer_needs", &self.customer_needs),
            ("product_features", &self.product_features),
            ("business_goals", &self.business_goals),
        ] {
            require_max_length(field, value.as_deref(), CANVAS_FIELD_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ModelCanvasCreate {
    pub project_id: String,
    #[serde(default)]
    pub key_partners: Option<String>,
    #[serde(default)]
    pub key_activities: Option<String>,
    #[serde(default)]
    pub key_resources: Option<String>,
    #[serde(default)]
    pub value_propositions: Option<String>,
    #[serde(default)]
    pub customer_relationships: Option<String>,
    #[serde(default)]
    pub channels: Option<String>,
    #[serde(default)]
    pub customer_segments: Option<String>,
    #[serde(default)]
    pub cost_structure: Option<String>,
    #[serde(default)]
    pub revenue_streams: Option<String>,
}

impl ModelCanvasCreate {
    /// Block values in [`BmcBlock::ALL`] order.
    #[must_use]
    pub fn blocks(&self) -> [(BmcBlock, Option<&str>); 9] {
        [
            (BmcBlock::KeyPartners, self.key_partners.as_deref()),
            (BmcBlock::KeyActivities, self.key_activities.as_deref()),
            (BmcBlock::KeyResources, self.key_resources.as_deref()),
            (BmcBlock::ValuePropositions, self.value_propositions.as_deref()),
            (BmcBlock::CustomerRelationships, self.customer_relationships.as_deref()),
            (BmcBlock::Channels, self.channels.as_deref()),
            (BmcBlock::CustomerSegments, self.customer_segments.as_deref()),
            (BmcBlock::CostStructure, self.cost_structure.as_deref()),
            (BmcBlock::RevenueStreams, self.revenue_streams.as_deref()),
        ]
    }
}

impl Validate for ModelCanvasCreate {
    fn validate(&self) -> Result<(), CoreError> {
        for (block, value) in self.blocks() {
            require_max_length(block.as_str(), value, CANVAS_FIELD_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CanvasItemCreate {
    pub block: BmcBlock,
    pub content: String,
    /// Explicit slot. Appended after the last item in the block when absent.
    #[serde(default)]
    pub position: Option<i64>,
}

impl Validate for CanvasItemCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("content", &self.content, 1, CANVAS_FIELD_MAX)
    }
}

// ---------------------------------------------------------------------------
// RICE
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiceItemCreate {
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub reach_score: i64,
    pub impact_score: i64,
    pub confidence_score: i64,
    pub effort_score: i64,
}

impl Validate for RiceItemCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("name", &self.name, 1, NAME_MAX)?;
        require_max_length("description", self.description.as_deref(), TEXT_MAX)?;
        require_range("reach_score", self.reach_score, SCORE_MIN, SCORE_MAX)?;
        require_range("impact_score", self.impact_score, SCORE_MIN, SCORE_MAX)?;
        require_range("confidence_score", self.confidence_score, SCORE_MIN, SCORE_MAX)?;
        require_range("effort_score", self.effort_score, EFFORT_MIN, SCORE_MAX)
    }
}

// ---------------------------------------------------------------------------
// Roadmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoadmapItemCreate {
    pub project_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Alias for `name` used by board clients.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quarter: Quarter,
    pub year: i64,
    #[serde(default)]
    pub status: RoadmapStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub position: Option<i64>,
}

impl RoadmapItemCreate {
    /// `name`, falling back to `content` when the name is missing or blank.
    #[must_use]
    pub fn resolved_name(&self) -> &str {
        match (self.name.as_deref(), self.content.as_deref()) {
            (Some(name), _) if !name.trim().is_empty() => name,
            (_, Some(content)) => content,
            (Some(name), None) => name,
            (None, None) => "",
        }
    }
}

impl Validate for RoadmapItemCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("name", self.resolved_name(), 1, NAME_MAX)?;
        require_max_length("description", self.description.as_deref(), TEXT_MAX)?;
        require_range("year", self.year, YEAR_MIN, YEAR_MAX)?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(CoreError::Validation(
                    "end_date must not be before start_date".into(),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// OKR
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ObjectiveCreate {
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: OkrStatus,
}

impl Validate for ObjectiveCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("title", &self.title, 1, TITLE_MAX)?;
        require_max_length("description", self.description.as_deref(), TEXT_MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KeyResultCreate {
    pub objective_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub current_value: f64,
    pub target_value: f64,
    #[serde(default)]
    pub status: OkrStatus,
}

impl Validate for KeyResultCreate {
    fn validate(&self) -> Result<(), CoreError> {
        require_length("title", &self.title, 1, TITLE_MAX)?;
        require_max_length("description", self.description.as_deref(), TEXT_MAX)?;
        require_positive("target_value", self.target_value)
    }
}

// ---------------------------------------------------------------------------
// Framework links
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FrameworkLinkCreate {
    pub project_id: String,
    pub source_item_id: String,
    pub source_item_type: ItemType,
    pub target_item_id: String,
    pub target_item_type: ItemType,
    #[serde(default)]
    pub link_type: Option<String>,
}

impl Validate for FrameworkLinkCreate {
    fn validate(&self) -> Result<(), CoreError> {
        if self.source_item_type == self.target_item_type
            && self.source_item_id == self.target_item_id
        {
            return Err(CoreError::Validation(
                "An item cannot be linked to itself".into(),
            ));
        }
        require_max_length("link_type", self.link_type.as_deref(), NAME_MAX)
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportRequest {
    pub frameworks: Vec<ReportFramework>,
    #[serde(default = "default_true")]
    pub include_cover_page: bool,
    #[serde(default = "default_true")]
    pub include_toc: bool,
}

impl ReportRequest {
    #[must_use]
    pub fn includes(&self, framework: ReportFramework) -> bool {
        self.frameworks.contains(&framework)
    }
}

impl Validate for ReportRequest {
    fn validate(&self) -> Result<(), CoreError> {
        if self.frameworks.is_empty() {
            return Err(CoreError::Validation(
                "At least one framework must be selected".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AI
// ---------------------------------------------------------------------------

/// Request for AI suggestions for one framework section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AiPromptRequest {
    pub prompt_type: PromptType,
    pub project_id: String,
    #[serde(default)]
    pub context: Option<String>,
    /// Section, quarter, or OKR selector depending on `prompt_type`.
    #[serde(default)]
    pub specific_query: Option<String>,
    #[serde(default)]
    pub category: Option<CsdCategory>,
    #[serde(default)]
    pub persona_category: Option<PersonaDetailCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoadmapSuggestionRequest {
    pub project_id: String,
    /// Timeframe (`now`/`next`/`later`) or priority (`high`/`medium`/`low`) column.
    #[serde(default)]
    pub category: Option<String>,
    /// `"timeframe"` groups the board by timeframe, anything else by priority.
    #[serde(default)]
    pub view_mode: Option<String>,
}
