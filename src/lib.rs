pub mod client;
pub mod config;
pub mod http;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod transcript;
pub mod upload;

pub use client::ApiClient;
pub use config::Config;
pub use http::{create_router, AppState};
pub use llm::{ChatCompletion, Feedback, LlmRelay, OpenAiClient, RelayError};
pub use prompt::{resolve, InterviewSelection, InterviewType, JobRole};
pub use session::{InterviewSession, Phase, SessionConfig, SessionDriver, SessionEvent};
pub use transcript::{ChatMessage, ChatRole, Speaker, Transcript, Turn};
pub use upload::{StoredVideo, VideoStore};
