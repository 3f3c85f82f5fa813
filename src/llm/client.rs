use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::error::RelayError;
use crate::config::UpstreamConfig;
use crate::transcript::ChatMessage;

/// Sampling parameters sent with every completion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl SamplingParams {
    /// Interviewer replies
    pub const CONVERSATION: SamplingParams = SamplingParams {
        temperature: 0.7,
        max_tokens: 500,
    };

    /// End-of-session evaluation
    pub const EVALUATION: SamplingParams = SamplingParams {
        temperature: 0.5,
        max_tokens: 800,
    };
}

/// Chat-completion backend
///
/// Implementations:
/// - `OpenAiClient`: OpenAI-compatible `/v1/chat/completions` over HTTPS
/// - test doubles that script replies
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send the message list and return the first choice's content
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
    ) -> Result<String, RelayError>;

    /// Whether a credential is available
    fn has_credential(&self) -> bool;

    /// Backend name for logging
    fn name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    message: Option<String>,
}

/// OpenAI-compatible chat-completion client
pub struct OpenAiClient {
    api_url: String,
    model: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RelayError::UpstreamUnavailable {
                status: None,
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            http,
        })
    }

    fn extract_error_message(body: &str) -> String {
        serde_json::from_str::<UpstreamErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
    ) -> Result<String, RelayError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            RelayError::Configuration("set OPENAI_API_KEY or upstream.api_key".to_string())
        })?;

        let body = CompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        debug!(
            "Sending {} messages to {} (temperature={}, max_tokens={})",
            messages.len(),
            self.api_url,
            params.temperature,
            params.max_tokens
        );

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Upstream request failed: {}", e);
                RelayError::UpstreamUnavailable {
                    status: None,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        info!("Upstream response status: {}", status);

        let body_text = response
            .text()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                message: e.to_string(),
            })?;

        if !status.is_success() {
            error!("Upstream API error: {}", body_text);
            return Err(RelayError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                message: Self::extract_error_message(&body_text),
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&body_text).map_err(|_| {
            RelayError::MalformedUpstreamResponse {
                raw: body_text.clone(),
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| {
                error!("Unexpected upstream response shape: {}", body_text);
                RelayError::MalformedUpstreamResponse { raw: body_text }
            })
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &str {
        "openai"
    }
}
