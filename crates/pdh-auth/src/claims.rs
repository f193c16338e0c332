use chrono::{DateTime, Utc};
use pdh_core::identity::AuthIdentity;
use serde::{Deserialize, Serialize};

/// Role assigned when the token carries none.
pub const DEFAULT_ROLE: &str = "user";

/// Profile data the platform copies into every access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Verified access token claims.
///
/// Produced by [`TokenVerifier::verify`](crate::TokenVerifier::verify) only
/// after the signature and `exp` have been checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Platform user ID.
    pub sub: String,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<UserMetadata>,
}

impl AccessClaims {
    /// `email` claim, falling back to `user_metadata.email`. Blank values count as missing.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        let direct = self.email.as_deref().filter(|e| !e.trim().is_empty());
        direct.or_else(|| {
            self.user_metadata
                .as_ref()
                .and_then(|m| m.email.as_deref())
                .filter(|e| !e.trim().is_empty())
        })
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Convert to the identity passed into every handler.
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.sub.clone(),
            email: self.email().map(str::to_string),
            role: self
                .role
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        }
    }
}
