use crate::llm::LlmRelay;
use crate::upload::VideoStore;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Relay to the upstream chat-completion API
    pub relay: LlmRelay,

    /// Where uploaded recordings land
    pub videos: VideoStore,
}

impl AppState {
    pub fn new(relay: LlmRelay, videos: VideoStore) -> Self {
        Self { relay, videos }
    }
}
