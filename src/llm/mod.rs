//! Upstream chat-completion relay
//!
//! - `ChatCompletion`: the upstream transport (OpenAI-compatible by default)
//! - `LlmRelay`: prepends the interviewer instruction, requests the next
//!   question, and requests and validates the end-of-session feedback

mod client;
mod error;
mod feedback;
mod relay;

pub use client::{ChatCompletion, OpenAiClient, SamplingParams};
pub use error::RelayError;
pub use feedback::{
    parse_feedback, strip_code_fences, Feedback, KEYWORD_COUNT, MAX_IMPROVEMENTS, MAX_STRENGTHS,
};
pub use relay::LlmRelay;
