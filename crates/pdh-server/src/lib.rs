//! # pdh-server
//!
//! HTTP surface of Product Discovery Hub.
//!
//! One axum router per framework, merged in [`routes::router`]. Every `/api`
//! route except health and the CORS test endpoint runs behind the [`CurrentUser`]
//! extractor, and every handler passes the caller's user id down to
//! `pdh-db` so queries stay inside the caller's rows.
//!
//! [`CurrentUser`]: extract::CurrentUser

pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::app;
pub use state::AppState;
