//! HTTP client for a locally hosted Ollama language model server.
//!
//! This module provides the [`OllamaClient`] type which implements the
//! [`LlmClient`] trait. It issues single non-streaming generation
//! requests and an availability probe against a running Ollama instance.

use crate::traits::{LlmClient, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Reply used whenever the backend fails; the conversation keeps going.
pub const FALLBACK_RESPONSE: &str =
    "Lo siento, estoy teniendo problemas para procesar esa información.";

const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection and sampling settings, fixed at construction.
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            model: "llama3.1".into(),
            temperature: 0.7,
            max_tokens: 200,
        }
    }
}

impl OllamaConfig {
    /// Build a config from the `OLLAMA_URL` and `OLLAMA_MODEL` environment
    /// variables, falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            match url.rsplit_once(':') {
                Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => {
                    cfg.host = host.to_string();
                    cfg.port = port.parse().unwrap_or(cfg.port);
                }
                _ => cfg.host = url,
            }
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            cfg.model = model;
        }
        cfg
    }

    fn base_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub struct OllamaClient {
    http: reqwest::Client,
    config: OllamaConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Join the context lines and append the prompt plus the speaker cue
    /// the model should continue from.
    fn compose(context: &[String], prompt: &str) -> String {
        let history = context.join("\n");
        format!("{history}\n{prompt}\nSputnik:")
    }

    async fn request_generation(&self, full_prompt: &str) -> Result<String, LlmError> {
        let payload = GenerateRequest {
            model: &self.config.model,
            prompt: full_prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };
        let res = self
            .http
            .post(format!("{}/api/generate", self.config.base_url()))
            .json(&payload)
            .timeout(GENERATE_TIMEOUT)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        if res.status() != reqwest::StatusCode::OK {
            return Err(LlmError::Status(res.status().as_u16()));
        }
        let body: GenerateResponse = res
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        Ok(body.response)
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, context: &[String], prompt: &str) -> String {
        let full_prompt = Self::compose(context, prompt);
        let head: String = full_prompt.chars().take(100).collect();
        debug!(prompt = %head, "sending generation request");
        match self.request_generation(&full_prompt).await {
            Ok(text) => {
                info!(chars = text.len(), "response generated");
                text
            }
            Err(e) => {
                error!(%e, "generation failed, using fallback reply");
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url());
        match self.http.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(res) => res.status() == reqwest::StatusCode::OK,
            Err(e) => {
                warn!(%e, "availability probe failed");
                false
            }
        }
    }
}
