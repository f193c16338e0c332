//! HTML rendering of a [`ReportSnapshot`].

use std::path::Path;

use minijinja::Environment;
use pdh_config::ReportConfig;
use pdh_core::report::ReportSnapshot;

use crate::error::ReportError;

const TEMPLATE_NAME: &str = "report.html";
const BUILTIN_TEMPLATE: &str = include_str!("../templates/report.html");

/// Owns the template environment. Built once at startup.
#[derive(Debug)]
pub struct HtmlRenderer {
    env: Environment<'static>,
}

impl HtmlRenderer {
    /// The template embedded in the binary.
    ///
    /// # Errors
    ///
    /// [`ReportError::Template`] if the template fails to compile.
    pub fn builtin() -> Result<Self, ReportError> {
        Self::from_source(BUILTIN_TEMPLATE.to_string())
    }

    /// # Errors
    ///
    /// [`ReportError::TemplateRead`] if the file cannot be read,
    /// [`ReportError::Template`] if it does not compile.
    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let source = std::fs::read_to_string(path).map_err(|source| ReportError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "using report template override");
        Self::from_source(source)
    }

    /// The override from config when set, otherwise the built-in template.
    ///
    /// # Errors
    ///
    /// See [`Self::from_file`].
    pub fn from_config(config: &ReportConfig) -> Result<Self, ReportError> {
        if config.has_template_override() {
            Self::from_file(Path::new(&config.template_path))
        } else {
            Self::builtin()
        }
    }

    fn from_source(source: String) -> Result<Self, ReportError> {
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, source)?;
        Ok(Self { env })
    }

    /// # Errors
    ///
    /// [`ReportError::Template`] on a render-time template failure.
    pub fn render(&self, snapshot: &ReportSnapshot) -> Result<String, ReportError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(snapshot)?)
    }
}
