//! Project update builder.

use pdh_core::errors::CoreError;
use pdh_core::requests::{CANVAS_FIELD_MAX, NAME_MAX};
use pdh_core::validate::{Validate, require_length, require_max_length};
use serde::{Deserialize, Serialize};

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

impl Validate for ProjectUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            require_length("name", name, 1, NAME_MAX)?;
        }
        require_max_length(
            "description",
            self.description.as_ref().and_then(Option::as_deref),
            CANVAS_FIELD_MAX,
        )
    }
}

pub struct ProjectUpdateBuilder(ProjectUpdate);

impl ProjectUpdateBuilder {
    pub fn new() -> Self {
        Self(ProjectUpdate::default())
    }

    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    pub fn build(self) -> ProjectUpdate {
        self.0
    }
}
