//! HTTP API for the browser interview client
//!
//! - POST /api/chat - Next interviewer message for a conversation
//! - POST /api/feedback - Structured evaluation of a finished conversation
//! - POST /api/upload-video - Store a recorded interview (multipart `video`)
//! - GET /api/health - Health check, reports whether the API key is set
//! - GET /uploads/videos/* - Stored recordings

mod handlers;
mod routes;
mod state;

pub use handlers::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, UploadResponse};
pub use routes::create_router;
pub use state::AppState;
