use super::state::AppState;
use crate::llm::{Feedback, RelayError};
use crate::prompt::InterviewSelection;
use crate::transcript::ChatMessage;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of `/api/chat` and `/api/feedback`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_position: Option<String>,
}

impl ChatRequest {
    fn selection(&self) -> InterviewSelection {
        InterviewSelection::from_wire(self.interview_type.as_deref(), self.job_position.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub api_key_set: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub path: String,
    pub size: u64,
    pub url: String,
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: Option<String>,
) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            details,
        }),
    )
        .into_response()
}

/// Map a relay failure onto the status and body the client expects
fn relay_error_response(err: RelayError) -> Response {
    match err {
        RelayError::Configuration(guidance) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Upstream API key is not configured",
            Some(guidance),
        ),
        RelayError::UpstreamUnavailable { status, message } => {
            let status = status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            error_response(status, "Upstream API error", Some(message))
        }
        RelayError::MalformedUpstreamResponse { raw } => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Malformed upstream response",
            Some(raw),
        ),
        RelayError::FeedbackParse { raw, .. } => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to parse feedback",
            Some(raw),
        ),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/chat
/// Relay the conversation and return the interviewer's next message
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    let selection = req.selection();
    info!(
        "Chat request: {} messages ({}/{})",
        req.messages.len(),
        selection.interview_type.as_str(),
        selection.job_role.as_str()
    );

    match state.relay.next_question(&req.messages, &selection).await {
        Ok(message) => (StatusCode::OK, Json(ChatResponse { message })).into_response(),
        Err(e) => {
            error!("Chat relay failed: {}", e);
            relay_error_response(e)
        }
    }
}

/// POST /api/feedback
/// Evaluate a finished conversation
pub async fn feedback(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    let selection = req.selection();
    info!(
        "Feedback request: {} messages ({}/{})",
        req.messages.len(),
        selection.interview_type.as_str(),
        selection.job_role.as_str()
    );

    match state.relay.evaluate(&req.messages, &selection).await {
        Ok(feedback) => (StatusCode::OK, Json::<Feedback>(feedback)).into_response(),
        Err(e) => {
            error!("Feedback relay failed: {}", e);
            relay_error_response(e)
        }
    }
}

/// POST /api/upload-video
/// Persist a recording sent as multipart field `video`
pub async fn upload_video(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Invalid multipart body: {}", e);
                return error_response(e.status(), "Invalid upload", Some(e.body_text()));
            }
        };

        if field.name() != Some("video") {
            continue;
        }

        return match state.videos.save_stream(Box::pin(field)).await {
            Ok(stored) => (
                StatusCode::OK,
                Json(UploadResponse {
                    message: "Video saved".to_string(),
                    filename: stored.filename,
                    path: stored.path,
                    size: stored.size,
                    url: stored.url,
                }),
            )
                .into_response(),
            Err(e) => {
                error!("Upload failed: {:#}", e);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store video",
                    Some(format!("{:#}", e)),
                )
            }
        };
    }

    error_response(StatusCode::BAD_REQUEST, "No video file in request", None)
}

/// GET /api/health
/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK".to_string(),
            message: "Server is running".to_string(),
            api_key_set: state.relay.has_credential(),
        }),
    )
}
