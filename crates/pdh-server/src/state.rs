//! Shared handler state.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use pdh_ai::{OpenRouterClient, Suggester};
use pdh_auth::{AuthProviderClient, TokenVerifier};
use pdh_config::{PdhConfig, ServerConfig};
use pdh_db::PdhService;
use pdh_report::ReportService;
use pdh_storage::StorageClient;

/// Cloned into every handler. Optional clients are `None` when their config
/// section is empty; the routes that need them answer 500 instead.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PdhService>,
    pub verifier: TokenVerifier,
    pub auth_provider: Option<AuthProviderClient>,
    pub suggester: Option<Suggester>,
    pub storage: Option<StorageClient>,
    pub reports: Arc<ReportService>,
    pub server: Arc<ServerConfig>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth_provider", &self.auth_provider.is_some())
            .field("suggester", &self.suggester.is_some())
            .field("storage", &self.storage.is_some())
            .field("pdf", &self.reports.produces_pdf())
            .finish_non_exhaustive()
    }
}

impl AppState {
    #[must_use]
    pub fn new(
        service: PdhService,
        verifier: TokenVerifier,
        reports: ReportService,
        server: ServerConfig,
    ) -> Self {
        Self {
            service: Arc::new(service),
            verifier,
            auth_provider: None,
            suggester: None,
            storage: None,
            reports: Arc::new(reports),
            server: Arc::new(server),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }

    #[must_use]
    pub fn with_auth_provider(mut self, client: AuthProviderClient) -> Self {
        self.auth_provider = Some(client);
        self
    }

    #[must_use]
    pub fn with_suggester(mut self, suggester: Suggester) -> Self {
        self.suggester = Some(suggester);
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: StorageClient) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Wire every client whose section is configured.
    ///
    /// # Errors
    ///
    /// Fails when the report template cannot be loaded or an HTTP client
    /// cannot be built.
    pub fn from_config(service: PdhService, config: &PdhConfig) -> anyhow::Result<Self> {
        let reports = ReportService::from_config(&config.report)?;
        if !config.report.is_configured() {
            tracing::info!("PDF renderer not configured; reports are served as HTML");
        }
        let mut state = Self::new(
            service,
            TokenVerifier::from_config(&config.auth),
            reports,
            config.server.clone(),
        );

        if config.auth.is_configured() {
            state = state.with_auth_provider(AuthProviderClient::new(&config.auth)?);
        } else {
            tracing::warn!("auth provider not configured; login and register are disabled");
        }

        if config.ai.is_configured() {
            let client = OpenRouterClient::from_config(&config.ai)?;
            tracing::info!(model = client.model(), "AI suggestions enabled");
            state = state.with_suggester(Suggester::new(Arc::new(client)));
        } else {
            tracing::warn!("AI provider not configured; suggestion endpoints will fail");
        }

        if config.storage.is_configured() {
            state = state.with_storage(StorageClient::from_config(&config.storage)?);
        } else {
            tracing::warn!("storage not configured; photo uploads will fail");
        }

        Ok(state)
    }

    pub fn suggester(&self) -> Result<&Suggester, pdh_ai::AiError> {
        self.suggester.as_ref().ok_or(pdh_ai::AiError::NotConfigured)
    }

    pub fn storage(&self) -> Result<&StorageClient, pdh_storage::StorageError> {
        self.storage
            .as_ref()
            .ok_or(pdh_storage::StorageError::NotConfigured)
    }

    pub fn auth_provider(&self) -> Result<&AuthProviderClient, pdh_auth::AuthError> {
        self.auth_provider
            .as_ref()
            .ok_or(pdh_auth::AuthError::NotConfigured)
    }
}
