//! Persona and persona detail updates.

use pdh_core::enums::PersonaDetailCategory;
use pdh_core::errors::CoreError;
use pdh_core::requests::{NAME_MAX, TEXT_MAX};
use pdh_core::validate::{Validate, require_length, require_range};
use serde::{Deserialize, Serialize};

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub quote: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub demographics: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<Option<String>>,
}

impl Validate for PersonaUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        match &self.name {
            Some(name) => require_length("name", name, 1, NAME_MAX),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaDetailUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PersonaDetailCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
}

impl Validate for PersonaDetailUpdate {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(content) = &self.content {
            require_length("content", content, 1, TEXT_MAX)?;
        }
        if let Some(order_index) = self.order_index {
            require_range("order_index", order_index, 0, i64::MAX)?;
        }
        Ok(())
    }
}
