//! Objective and key result updates.

use pdh_core::enums::OkrStatus;
use pdh_core::errors::CoreError;
use pdh_core::requests::{TEXT_MAX, TITLE_MAX};
use pdh_core::validate::{Validate, require_length, require_max_length, require_positive};
use serde::{Deserialize, Serialize};

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OkrStatus>,
}

impl Validate for ObjectiveUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            require_length("title", title, 1, TITLE_MAX)?;
        }
        require_max_length(
            "description",
            self.description.as_ref().and_then(Option::as_deref),
            TEXT_MAX,
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyResultUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OkrStatus>,
}

impl Validate for KeyResultUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            require_length("title", title, 1, TITLE_MAX)?;
        }
        require_max_length(
            "description",
            self.description.as_ref().and_then(Option::as_deref),
            TEXT_MAX,
        )?;
        if let Some(target) = self.target_value {
            require_positive("target_value", target)?;
        }
        Ok(())
    }
}

pub struct KeyResultUpdateBuilder(KeyResultUpdate);

impl KeyResultUpdateBuilder {
    pub fn new() -> Self {
        Self(KeyResultUpdate::default())
    }

    pub fn current_value(mut self, val: f64) -> Self {
        self.0.current_value = Some(val);
        self
    }

    pub fn target_value(mut self, val: f64) -> Self {
        self.0.target_value = Some(val);
        self
    }

    pub fn status(mut self, val: OkrStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    pub fn build(self) -> KeyResultUpdate {
        self.0
    }
}
