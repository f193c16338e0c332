//! # pdh-auth
//!
//! Authentication for Product Discovery Hub.
//!
//! Access tokens are issued by a hosted auth platform and signed with a
//! shared HS256 secret. [`TokenVerifier`] checks signature and expiry and
//! turns the claims into an [`AuthIdentity`](pdh_core::identity::AuthIdentity).
//! [`AuthProviderClient`] forwards password login and signup to the platform.

pub mod claims;
pub mod error;
mod http;
pub mod provider;
pub mod verifier;

pub use claims::AccessClaims;
pub use error::AuthError;
pub use provider::AuthProviderClient;
pub use verifier::TokenVerifier;
