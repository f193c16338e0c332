//! # pdh-ai
//!
//! AI suggestions for Product Discovery Hub.
//!
//! - [`client`] talks to an OpenAI-compatible `/chat/completions` endpoint
//!   behind the [`CompletionBackend`] trait so tests can swap in a stub.
//! - [`prompts`] builds the per-framework prompt text.
//! - [`parse`] turns model output into suggestion lists.
//! - [`suggester`] validates a request, picks the prompt, and applies the
//!   roadmap fallback.
//! - [`roadmap`] produces the deterministic board suggestions that need no
//!   model call.

pub mod client;
pub mod error;
pub mod parse;
pub mod prompts;
pub mod roadmap;
pub mod suggester;

pub use client::{CompletionBackend, CompletionRequest, OpenRouterClient};
pub use error::AiError;
pub use suggester::{PromptContext, SuggestionTarget, Suggester};
