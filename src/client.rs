//! Typed client for the interview HTTP API
//!
//! Mirrors what the browser client sends: the conversation with the chosen
//! type and role to `/api/chat` and `/api/feedback`, recordings to
//! `/api/upload-video`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use crate::http::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, UploadResponse};
use crate::llm::{parse_feedback, Feedback, RelayError};
use crate::prompt::InterviewSelection;
use crate::session::{InterviewBackend, UploadError, VideoUploader};
use crate::transcript::ChatMessage;
use crate::upload::StoredVideo;

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request_body(messages: &[ChatMessage], selection: &InterviewSelection) -> ChatRequest {
        ChatRequest {
            messages: messages.to_vec(),
            interview_type: Some(selection.interview_type.as_str().to_string()),
            job_position: Some(selection.job_role.as_str().to_string()),
        }
    }

    /// POST a conversation and return the successful body text
    async fn post_conversation(
        &self,
        path: &str,
        messages: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<String, RelayError> {
        let response = self
            .http
            .post(self.url(path))
            .json(&Self::request_body(messages, selection))
            .send()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                message: e.to_string(),
            })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| match e.details {
                    Some(details) => format!("{}: {}", e.error, details),
                    None => e.error,
                })
                .unwrap_or(body);
            warn!("{} failed with {}: {}", path, status, message);
            return Err(RelayError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(body)
    }

    /// GET /api/health
    pub async fn health(&self) -> Result<HealthResponse, RelayError> {
        let response = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                message: "health check failed".to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                message: e.to_string(),
            })?;
        serde_json::from_str(&body).map_err(|_| RelayError::MalformedUpstreamResponse { raw: body })
    }
}

#[async_trait]
impl InterviewBackend for ApiClient {
    async fn next_question(
        &self,
        messages: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<String, RelayError> {
        let body = self.post_conversation("/api/chat", messages, selection).await?;
        serde_json::from_str::<ChatResponse>(&body)
            .map(|r| r.message)
            .map_err(|_| RelayError::MalformedUpstreamResponse { raw: body })
    }

    async fn evaluate(
        &self,
        messages: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<Feedback, RelayError> {
        let body = self
            .post_conversation("/api/feedback", messages, selection)
            .await?;
        parse_feedback(&body)
    }
}

#[async_trait]
impl VideoUploader for ApiClient {
    async fn upload(&self, blob: Vec<u8>) -> Result<StoredVideo, UploadError> {
        let size = blob.len();
        let filename = format!("interview_{}.webm", chrono::Utc::now().format("%Y-%m-%d"));
        let part = Part::bytes(blob)
            .file_name(filename)
            .mime_str("video/webm")
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let form = Form::new().part("video", part);

        let response = self
            .http
            .post(self.url("/api/upload-video"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        info!("Uploaded recording ({} bytes) as {}", size, uploaded.filename);

        Ok(StoredVideo {
            filename: uploaded.filename,
            path: uploaded.path,
            size: uploaded.size,
            url: uploaded.url,
        })
    }
}
