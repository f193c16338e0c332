//! Client for an external HTML-to-PDF service.
//!
//! The service receives the rendered HTML as the request body and answers
//! with the PDF bytes. Gotenberg-style and headless-Chrome wrappers both fit.

use std::time::Duration;

use pdh_config::ReportConfig;

use crate::error::ReportError;

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    http: reqwest::Client,
    url: String,
}

impl PdfRenderer {
    /// `None` when no renderer is configured.
    ///
    /// # Errors
    ///
    /// [`ReportError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &ReportConfig) -> Result<Option<Self>, ReportError> {
        if !config.is_configured() {
            return Ok(None);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Some(Self {
            http,
            url: config.renderer_url.clone(),
        }))
    }

    /// # Errors
    ///
    /// [`ReportError::Renderer`] on a non-success status.
    pub async fn render(&self, html: String) -> Result<Vec<u8>, ReportError> {
        tracing::debug!(url = %self.url, bytes = html.len(), "sending report to PDF renderer");
        let resp = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/html; charset=utf-8")
            .header(reqwest::header::ACCEPT, "application/pdf")
            .body(html)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}

async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ReportError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(ReportError::Renderer {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[test]
    fn renderer_is_optional() {
        assert!(PdfRenderer::from_config(&ReportConfig::default()).unwrap().is_none());
        let config = ReportConfig {
            renderer_url: "http://localhost:3001/forms/chromium/convert/html".into(),
            ..ReportConfig::default()
        };
        assert!(PdfRenderer::from_config(&config).unwrap().is_some());
    }

    #[tokio::test]
    async fn renderer_failure_keeps_body() {
        let err = check_response(mock_response(500, "chromium crashed"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "PDF renderer returned 500: chromium crashed");
    }
}
