//! # pdh-core
//!
//! Shared types for Product Discovery Hub: framework entities, storage enums,
//! request payloads with their validation rules, response envelopes, ID
//! prefixes, and the cross-cutting [`errors::CoreError`].
//!
//! This crate carries no I/O. `pdh-db` persists these types, `pdh-server`
//! exposes them over HTTP.

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod report;
pub mod requests;
pub mod responses;
pub mod scoring;
pub mod validate;
