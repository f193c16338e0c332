//! Roadmap item update builder.

use chrono::NaiveDate;
use pdh_core::enums::{Priority, Quarter, RoadmapStatus, Timeframe};
use pdh_core::errors::CoreError;
use pdh_core::requests::{NAME_MAX, TEXT_MAX, YEAR_MAX, YEAR_MIN};
use pdh_core::validate::{Validate, require_length, require_max_length, require_range};
use serde::{Deserialize, Serialize};

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Board alias for `name`. Ignored when `name` is also present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<Quarter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RoadmapStatus>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl RoadmapItemUpdate {
    /// New card title: `name`, else `content`.
    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.content.as_deref())
    }
}

impl Validate for RoadmapItemUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = self.resolved_name() {
            require_length("name", name, 1, NAME_MAX)?;
        }
        require_max_length(
            "description",
            self.description.as_ref().and_then(Option::as_deref),
            TEXT_MAX,
        )?;
        if let Some(year) = self.year {
            require_range("year", year, YEAR_MIN, YEAR_MAX)?;
        }
        if let Some(position) = self.position {
            require_range("position", position, 0, i64::MAX)?;
        }
        if let (Some(Some(start)), Some(Some(end))) = (self.start_date, self.end_date) {
            if end < start {
                return Err(CoreError::Validation(
                    "end_date must not be before start_date".into(),
                ));
            }
        }
        Ok(())
    }
}

pub struct RoadmapItemUpdateBuilder(RoadmapItemUpdate);

impl RoadmapItemUpdateBuilder {
    pub fn new() -> Self {
        Self(RoadmapItemUpdate::default())
    }

    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    pub fn content(mut self, val: impl Into<String>) -> Self {
        self.0.content = Some(val.into());
        self
    }

    pub fn status(mut self, val: RoadmapStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    pub fn timeframe(mut self, val: Timeframe) -> Self {
        self.0.timeframe = Some(val);
        self
    }

    pub fn end_date(mut self, val: Option<NaiveDate>) -> Self {
        self.0.end_date = Some(val);
        self
    }

    pub fn build(self) -> RoadmapItemUpdate {
        self.0
    }
}
