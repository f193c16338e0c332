use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated caller identity passed from `pdh-auth` into handlers.
///
/// Every owner-scoped query keys on `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuthIdentity {
    /// Hosted auth platform user ID (JWT `sub` claim).
    pub user_id: String,
    /// Email from the `email` claim or `user_metadata.email`.
    pub email: Option<String>,
    /// Platform role, `"user"` when the token carries none.
    pub role: String,
}
