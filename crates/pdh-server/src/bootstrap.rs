use anyhow::Context;
use pdh_config::{DatabaseConfig, PdhConfig};
use pdh_db::PdhService;

pub fn load_config() -> anyhow::Result<PdhConfig> {
    PdhConfig::load_with_dotenv().context("failed to load pdh configuration")
}

/// Remote libSQL when a URL and token are configured, else the local file.
/// Opening applies migrations.
pub async fn open_service(config: &DatabaseConfig) -> anyhow::Result<PdhService> {
    if config.is_remote() {
        tracing::info!(url = %config.url, "opening remote database");
        PdhService::new_remote(&config.url, &config.auth_token)
            .await
            .with_context(|| format!("failed to open remote database at {}", config.url))
    } else {
        tracing::info!(path = %config.path, "opening local database");
        PdhService::new_local(&config.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.path))
    }
}
