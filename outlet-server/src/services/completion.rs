//! Completion Client
//!
//! Hosted text-completion provider (Together.AI). [`CompletionBackend`] is
//! the seam that lets tests substitute a stub for the network client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generation parameters for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Generation halts at the first stop sequence. The SQL translation
    /// contract is a single line, so "\n" caps output to one statement.
    pub stop: Vec<String>,
}

/// Response envelope from the completion provider.
///
/// Callers use only the first candidate's text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub text: String,
}

/// Completion transport/protocol failures. No retries; every failure is
/// terminal for the request that triggered it.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("completion provider returned status {0}")]
    Status(u16),

    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}

/// Seam for the hosted completion model.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<CompletionResponse, CompletionError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    stop: &'a [String],
}

/// Together.AI `/v1/completions` client.
pub struct TogetherClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl TogetherClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            base_url,
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionBackend for TogetherClient {
    async fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<CompletionResponse, CompletionError> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            stop: &params.stop,
        };

        let resp = self
            .client
            .post(format!("{}/v1/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CompletionError::Status(resp.status().as_u16()));
        }

        resp.json::<CompletionResponse>()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))
    }
}
