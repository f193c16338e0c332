//! # pdh-storage
//!
//! Persona photo storage on the hosted platform's object storage API.
//!
//! [`upload::PhotoUpload`] checks an incoming file before any network call,
//! [`client::StorageClient`] stores it and provisions the bucket.

pub mod client;
pub mod error;
pub mod upload;

pub use client::StorageClient;
pub use error::StorageError;
pub use upload::PhotoUpload;
