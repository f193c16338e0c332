//! # pdh-report
//!
//! Renders a project report from a [`ReportSnapshot`] assembled by `pdh-db`.
//! HTML comes from a minijinja template (embedded, or overridden through
//! `report.template_path`). When `report.renderer_url` is set the HTML is
//! converted to PDF by that service.

pub mod error;
pub mod pdf;
pub mod render;

pub use error::ReportError;
pub use pdf::PdfRenderer;
pub use render::HtmlRenderer;

use pdh_config::ReportConfig;
use pdh_core::report::ReportSnapshot;

/// A finished report ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
}

impl ReportDocument {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name.replace('"', "'"))
    }
}

#[derive(Debug)]
pub struct ReportService {
    html: HtmlRenderer,
    pdf: Option<PdfRenderer>,
}

impl ReportService {
    pub const fn new(html: HtmlRenderer, pdf: Option<PdfRenderer>) -> Self {
        Self { html, pdf }
    }

    /// # Errors
    ///
    /// Template loading or HTTP client construction failures.
    pub fn from_config(config: &ReportConfig) -> Result<Self, ReportError> {
        Ok(Self::new(
            HtmlRenderer::from_config(config)?,
            PdfRenderer::from_config(config)?,
        ))
    }

    pub const fn produces_pdf(&self) -> bool {
        self.pdf.is_some()
    }

    /// Render the snapshot to PDF when a renderer is configured, else HTML.
    ///
    /// # Errors
    ///
    /// Template or renderer failures.
    pub async fn build(&self, snapshot: &ReportSnapshot) -> Result<ReportDocument, ReportError> {
        let html = self.html.render(snapshot)?;
        let stem = snapshot.file_stem();
        match &self.pdf {
            Some(pdf) => Ok(ReportDocument {
                bytes: pdf.render(html).await?,
                content_type: "application/pdf",
                file_name: format!("{stem}.pdf"),
            }),
            None => Ok(ReportDocument {
                bytes: html.into_bytes(),
                content_type: "text/html; charset=utf-8",
                file_name: format!("{stem}.html"),
            }),
        }
    }
}
