use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

/// Interface to a language model backend.
///
/// `generate` never fails from the caller's point of view: transport
/// problems degrade into a fixed apology line so the host's turn loop
/// keeps running.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Produce a reply for `prompt`, preceded by the joined `context` lines.
    async fn generate(&self, context: &[String], prompt: &str) -> String;

    /// Probe the backend; `true` only when the probe came back with 200.
    async fn is_available(&self) -> bool;
}
