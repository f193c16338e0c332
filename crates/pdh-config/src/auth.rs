//! Hosted auth platform configuration.

use serde::{Deserialize, Serialize};

/// Clock skew tolerated when checking `exp`, in seconds.
const fn default_leeway_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Base URL of the hosted platform (e.g., `https://abc.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public anon key, sent as `apikey` on login and signup.
    #[serde(default)]
    pub anon_key: String,

    /// Service role key for admin operations (storage provisioning).
    #[serde(default)]
    pub service_role_key: String,

    /// HS256 secret the platform signs access tokens with.
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_role_key: String::new(),
            jwt_secret: String::new(),
            leeway_secs: default_leeway_secs(),
        }
    }
}

impl AuthConfig {
    /// Check if bearer tokens can be verified.
    pub fn can_verify_tokens(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    /// Check if login and registration can be forwarded to the platform.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_not_configured() {
        let config = AuthConfig::default();
        assert!(!config.is_configured());
        assert!(!config.can_verify_tokens());
        assert_eq!(config.leeway_secs, 30);
    }

    #[test]
    fn secret_alone_enables_verification() {
        let config = AuthConfig {
            jwt_secret: "super-secret".into(),
            ..Default::default()
        };
        assert!(config.can_verify_tokens());
        assert!(!config.is_configured());
    }
}
