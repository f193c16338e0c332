//! CSD item update builder.

use pdh_core::enums::CsdCategory;
use pdh_core::errors::CoreError;
use pdh_core::requests::TEXT_MAX;
use pdh_core::validate::{Validate, require_length, require_range};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsdItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CsdCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl Validate for CsdItemUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(text) = &self.text {
            require_length("text", text, 1, TEXT_MAX)?;
        }
        if let Some(position) = self.position {
            require_range("position", position, 0, i64::MAX)?;
        }
        Ok(())
    }
}

pub struct CsdItemUpdateBuilder(CsdItemUpdate);

impl CsdItemUpdateBuilder {
    pub fn new() -> Self {
        Self(CsdItemUpdate::default())
    }

    pub fn category(mut self, val: CsdCategory) -> Self {
        self.0.category = Some(val);
        self
    }

    pub fn text(mut self, val: impl Into<String>) -> Self {
        self.0.text = Some(val.into());
        self
    }

    pub fn position(mut self, val: i64) -> Self {
        self.0.position = Some(val);
        self
    }

    pub fn build(self) -> CsdItemUpdate {
        self.0
    }
}
