//! Category, status, and type-tag enums for Product Discovery Hub.
//!
//! Every enum serializes to the exact string stored in SQL. The schema carries
//! a matching `CHECK (... IN (...))` constraint per column, so `as_str()` and
//! the migration must stay in sync.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Implements `Display` via `as_str()` and `FromStr` via serde for a storage enum.
macro_rules! storage_enum_impls {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|_| {
                    CoreError::Validation(format!("Invalid {}: '{s}'", $label))
                })
            }
        }
    };
}

// ---------------------------------------------------------------------------
// CsdCategory
// ---------------------------------------------------------------------------

/// Column of the Certainties / Suppositions / Doubts matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum CsdCategory {
    Certainty,
    Supposition,
    Doubt,
}

impl CsdCategory {
    pub const ALL: [Self; 3] = [Self::Certainty, Self::Supposition, Self::Doubt];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Certainty => "Certainty",
            Self::Supposition => "Supposition",
            Self::Doubt => "Doubt",
        }
    }
}

storage_enum_impls!(CsdCategory, "CSD category");

// ---------------------------------------------------------------------------
// PersonaDetailCategory
// ---------------------------------------------------------------------------

/// Section of a persona card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PersonaDetailCategory {
    Goal,
    Need,
    #[serde(rename = "Pain Point")]
    PainPoint,
    Motivation,
}

impl PersonaDetailCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "Goal",
            Self::Need => "Need",
            Self::PainPoint => "Pain Point",
            Self::Motivation => "Motivation",
        }
    }

    /// Short description used when prompting for suggestions in this section.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Goal => "goals and objectives the persona wants to achieve",
            Self::Need => "needs and requirements the persona has",
            Self::PainPoint => "pain points, frustrations, and challenges the persona faces",
            Self::Motivation => "motivations and drivers behind the persona's behavior",
        }
    }
}

storage_enum_impls!(PersonaDetailCategory, "persona detail category");

// ---------------------------------------------------------------------------
// Roadmap enums
// ---------------------------------------------------------------------------

/// Calendar quarter of a roadmap item. Lexicographic order matches calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

storage_enum_impls!(Quarter, "quarter");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum RoadmapStatus {
    #[default]
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Delayed,
}

impl RoadmapStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
        }
    }
}

storage_enum_impls!(RoadmapStatus, "roadmap status");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

storage_enum_impls!(Priority, "priority");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Now,
    #[default]
    Next,
    Later,
}

impl Timeframe {
    pub const ALL: [Self; 3] = [Self::Now, Self::Next, Self::Later];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Next => "next",
            Self::Later => "later",
        }
    }
}

storage_enum_impls!(Timeframe, "timeframe");

// ---------------------------------------------------------------------------
// OkrStatus
// ---------------------------------------------------------------------------

/// Status shared by objectives and key results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum OkrStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl OkrStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::AtRisk => "At Risk",
        }
    }
}

storage_enum_impls!(OkrStatus, "OKR status");

// ---------------------------------------------------------------------------
// Canvas sections
// ---------------------------------------------------------------------------

/// Section of the product vision board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PvbSection {
    Vision,
    TargetCustomers,
    CustomerNeeds,
    ProductFeatures,
    BusinessGoals,
}

impl PvbSection {
    pub const ALL: [Self; 5] = [
        Self::Vision,
        Self::TargetCustomers,
        Self::CustomerNeeds,
        Self::ProductFeatures,
        Self::BusinessGoals,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::TargetCustomers => "target_customers",
            Self::CustomerNeeds => "customer_needs",
            Self::ProductFeatures => "product_features",
            Self::BusinessGoals => "business_goals",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vision => "Vision",
            Self::TargetCustomers => "Target Customers",
            Self::CustomerNeeds => "Customer Needs",
            Self::ProductFeatures => "Product Features",
            Self::BusinessGoals => "Business Goals",
        }
    }
}

storage_enum_impls!(PvbSection, "vision board section");

/// One of the nine business model canvas blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BmcBlock {
    KeyPartners,
    KeyActivities,
    KeyResources,
    ValuePropositions,
    CustomerRelationships,
    Channels,
    CustomerSegments,
    CostStructure,
    RevenueStreams,
}

impl BmcBlock {
    pub const ALL: [Self; 9] = [
        Self::KeyPartners,
        Self::KeyActivities,
        Self::KeyResources,
        Self::ValuePropositions,
        Self::CustomerRelationships,
        Self::Channels,
        Self::CustomerSegments,
        Self::CostStructure,
        Self::RevenueStreams,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeyPartners => "key_partners",
            Self::KeyActivities => "key_activities",
            Self::KeyResources => "key_resources",
            Self::ValuePropositions => "value_propositions",
            Self::CustomerRelationships => "customer_relationships",
            Self::Channels => "channels",
            Self::CustomerSegments => "customer_segments",
            Self::CostStructure => "cost_structure",
            Self::RevenueStreams => "revenue_streams",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::KeyPartners => "Key Partners",
            Self::KeyActivities => "Key Activities",
            Self::KeyResources => "Key Resources",
            Self::ValuePropositions => "Value Propositions",
            Self::CustomerRelationships => "Customer Relationships",
            Self::Channels => "Channels",
            Self::CustomerSegments => "Customer Segments",
            Self::CostStructure => "Cost Structure",
            Self::RevenueStreams => "Revenue Streams",
        }
    }
}

storage_enum_impls!(BmcBlock, "canvas block");

// ---------------------------------------------------------------------------
// ItemType
// ---------------------------------------------------------------------------

/// Type tag for framework items that can be the endpoint of a framework link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    CsdItem,
    RoadmapItem,
    PersonaDetail,
    OkrKeyResult,
    Objective,
    RiceItem,
}

impl ItemType {
    pub const ALL: [Self; 6] = [
        Self::CsdItem,
        Self::RoadmapItem,
        Self::PersonaDetail,
        Self::OkrKeyResult,
        Self::Objective,
        Self::RiceItem,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CsdItem => "csd_item",
            Self::RoadmapItem => "roadmap_item",
            Self::PersonaDetail => "persona_detail",
            Self::OkrKeyResult => "okr_key_result",
            Self::Objective => "objective",
            Self::RiceItem => "rice_item",
        }
    }
}

storage_enum_impls!(ItemType, "item type");

// ---------------------------------------------------------------------------
// AI and report selectors
// ---------------------------------------------------------------------------

/// Framework an AI suggestion request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    Csd,
    Pvb,
    Bmc,
    Rice,
    Roadmap,
    Okr,
    Persona,
}

impl PromptType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csd => "csd",
            Self::Pvb => "pvb",
            Self::Bmc => "bmc",
            Self::Rice => "rice",
            Self::Roadmap => "roadmap",
            Self::Okr => "okr",
            Self::Persona => "persona",
        }
    }
}

storage_enum_impls!(PromptType, "prompt type");

/// Framework section that can be included in a generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFramework {
    Csd,
    Pvb,
    Bmc,
    Rice,
    Roadmap,
    Okr,
}

impl ReportFramework {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csd => "csd",
            Self::Pvb => "pvb",
            Self::Bmc => "bmc",
            Self::Rice => "rice",
            Self::Roadmap => "roadmap",
            Self::Okr => "okr",
        }
    }
}

storage_enum_impls!(ReportFramework, "report framework");
