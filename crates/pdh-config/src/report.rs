//! Report rendering configuration.

use serde::{Deserialize, Serialize};

/// Upper bound for one HTML-to-PDF conversion, in seconds.
const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Optional template override. The built-in template is used when empty.
    #[serde(default)]
    pub template_path: String,

    /// HTML-to-PDF service. Reports are returned as HTML when empty.
    #[serde(default)]
    pub renderer_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template_path: String::new(),
            renderer_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ReportConfig {
    /// Check if reports are converted to PDF.
    pub fn is_configured(&self) -> bool {
        !self.renderer_url.is_empty()
    }

    pub fn has_template_override(&self) -> bool {
        !self.template_path.is_empty()
    }
}
