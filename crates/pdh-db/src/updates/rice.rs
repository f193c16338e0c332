//! RICE item update builder.

use pdh_core::errors::CoreError;
use pdh_core::requests::{EFFORT_MIN, NAME_MAX, SCORE_MAX, SCORE_MIN, TEXT_MAX};
use pdh_core::validate::{Validate, require_length, require_max_length, require_range};
use serde::{Deserialize, Serialize};

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiceItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_score: Option<i64>,
}

impl RiceItemUpdate {
    /// Whether any input of the derived score changes.
    #[must_use]
    pub const fn touches_score(&self) -> bool {
        self.reach_score.is_some()
            || self.impact_score.is_some()
            || self.confidence_score.is_some()
            || self.effort_score.is_some()
    }
}

impl Validate for RiceItemUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            require_length("name", name, 1, NAME_MAX)?;
        }
        require_max_length(
            "description",
            self.description.as_ref().and_then(Option::as_deref),
            TEXT_MAX,
        )?;
        for (field, value, min) in [
            ("reach_score", self.reach_score, SCORE_MIN),
            ("impact_score", self.impact_score, SCORE_MIN),
            ("confidence_score", self.confidence_score, SCORE_MIN),
            ("effort_score", self.effort_score, EFFORT_MIN),
        ] {
            if let Some(value) = value {
                require_range(field, value, min, SCORE_MAX)?;
            }
        }
        Ok(())
    }
}

pub struct RiceItemUpdateBuilder(RiceItemUpdate);

impl RiceItemUpdateBuilder {
    pub fn new() -> Self {
        Self(RiceItemUpdate::default())
    }

    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    pub fn reach_score(mut self, val: i64) -> Self {
        self.0.reach_score = Some(val);
        self
    }

    pub fn impact_score(mut self, val: i64) -> Self {
        self.0.impact_score = Some(val);
        self
    }

    pub fn confidence_score(mut self, val: i64) -> Self {
        self.0.confidence_score = Some(val);
        self
    }

    pub fn effort_score(mut self, val: i64) -> Self {
        self.0.effort_score = Some(val);
        self
    }

    pub fn build(self) -> RiceItemUpdate {
        self.0
    }
}
