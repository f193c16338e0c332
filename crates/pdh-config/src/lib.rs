//! # pdh-config
//!
//! Layered configuration loading for Product Discovery Hub using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PDH_*` prefix, `__` as separator)
//! 2. Project-level `.pdh/config.toml`
//! 3. User-level `~/.config/pdh/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PDH_AUTH__JWT_SECRET` -> `auth.jwt_secret`,
//! `PDH_SERVER__PORT` -> `server.port`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use pdh_config::PdhConfig;
//!
//! let config = PdhConfig::load_with_dotenv().expect("config");
//! if config.ai.is_configured() {
//!     println!("AI model: {}", config.ai.model);
//! }
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod report;
mod server;
mod storage;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use report::ReportConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PdhConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl PdhConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config: Self = Self::figment().extract()?;
        config.apply_fallbacks();
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".pdh/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("PDH_").split("__"))
    }

    /// Check the fields the HTTP server cannot start without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when the JWT secret is missing and
    /// `ConfigError::InvalidValue` for a zero port or upload limit.
    pub fn validate_for_server(&self) -> Result<(), ConfigError> {
        if !self.auth.can_verify_tokens() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".into(),
                reason: "must be non-zero".into(),
            });
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_upload_bytes".into(),
                reason: "must be non-zero".into(),
            });
        }
        Ok(())
    }

    /// Storage shares the auth platform's URL and service key unless overridden.
    fn apply_fallbacks(&mut self) {
        if self.storage.url.is_empty() {
            self.storage.url.clone_from(&self.auth.url);
        }
        if self.storage.service_key.is_empty() {
            self.storage.service_key.clone_from(&self.auth.service_role_key);
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pdh").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = PdhConfig::default();
        assert!(!config.auth.is_configured());
        assert!(!config.ai.is_configured());
        assert!(!config.storage.is_configured());
        assert!(!config.database.is_remote());
        assert!(!config.report.is_configured());
    }

    #[test]
    fn figment_builds_without_files() {
        let config: PdhConfig = PdhConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.bucket, "personas");
    }

    #[test]
    fn server_requires_jwt_secret() {
        let mut config = PdhConfig::default();
        assert!(matches!(
            config.validate_for_server(),
            Err(ConfigError::NotConfigured { .. })
        ));
        config.auth.jwt_secret = "secret".into();
        assert!(config.validate_for_server().is_ok());
        config.server.port = 0;
        assert!(matches!(
            config.validate_for_server(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn storage_falls_back_to_auth_platform() {
        let mut config = PdhConfig::default();
        config.auth.url = "https://abc.supabase.co".into();
        config.auth.service_role_key = "service".into();
        config.apply_fallbacks();
        assert_eq!(config.storage.url, "https://abc.supabase.co");
        assert!(config.storage.is_configured());
    }
}
