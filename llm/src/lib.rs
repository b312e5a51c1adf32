//! Abstractions for interacting with a language model server.
//!
//! The `llm` crate defines a [`LlmClient`] trait along with the concrete
//! [`OllamaClient`] implementation. Backend failures are absorbed here:
//! callers always receive text, at worst the fixed [`FALLBACK_RESPONSE`].

pub mod client;
pub mod traits;

pub use client::{OllamaClient, OllamaConfig, FALLBACK_RESPONSE};
pub use traits::{LlmClient, LlmError};
