use super::handlers;
use super::state::AppState;
use crate::upload::PUBLIC_PREFIX;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let recordings = ServeDir::new(state.videos.dir().to_path_buf());

    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))
        // Conversation relay
        .route("/api/chat", post(handlers::chat))
        .route("/api/feedback", post(handlers::feedback))
        // Recordings
        .route(
            "/api/upload-video",
            post(handlers::upload_video).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .nest_service(PUBLIC_PREFIX, recordings)
        // Browser client runs on a different origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
