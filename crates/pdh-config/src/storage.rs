//! Storage bucket configuration for persona photos.

use serde::{Deserialize, Serialize};

fn default_bucket() -> String {
    "personas".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Storage API base URL. Falls back to `auth.url` when empty.
    #[serde(default)]
    pub url: String,

    /// Key with write access to the bucket. Falls back to `auth.service_role_key`.
    #[serde(default)]
    pub service_key: String,

    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_key: String::new(),
            bucket: default_bucket(),
        }
    }
}

impl StorageConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.service_key.is_empty()
    }
}
