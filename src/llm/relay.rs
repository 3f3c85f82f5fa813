use std::sync::Arc;
use tracing::{error, info};

use super::client::{ChatCompletion, SamplingParams};
use super::error::RelayError;
use super::feedback::{parse_feedback, Feedback};
use crate::prompt::{feedback_instruction, feedback_request, InterviewSelection};
use crate::transcript::{ChatMessage, ChatRole, Transcript};

/// Relays interview conversations to the upstream model
#[derive(Clone)]
pub struct LlmRelay {
    upstream: Arc<dyn ChatCompletion>,
}

impl LlmRelay {
    pub fn new(upstream: Arc<dyn ChatCompletion>) -> Self {
        Self { upstream }
    }

    pub fn has_credential(&self) -> bool {
        self.upstream.has_credential()
    }

    /// Ask the interviewer persona for its next message
    pub async fn next_question(
        &self,
        conversation: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<String, RelayError> {
        info!(
            "Requesting next question ({}/{}, {} messages)",
            selection.interview_type.as_str(),
            selection.job_role.as_str(),
            conversation.len()
        );

        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage::system(selection.system_instruction()));
        messages.extend(
            conversation
                .iter()
                .filter(|m| m.role != ChatRole::System)
                .cloned(),
        );

        self.upstream
            .complete(messages, SamplingParams::CONVERSATION)
            .await
    }

    /// Ask the upstream to score the whole conversation
    pub async fn evaluate(
        &self,
        conversation: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<Feedback, RelayError> {
        info!(
            "Requesting feedback ({}/{})",
            selection.interview_type.as_str(),
            selection.job_role.as_str()
        );

        let dialogue = Transcript::from_messages(conversation).render_dialogue();
        let messages = vec![
            ChatMessage::system(feedback_instruction(selection)),
            ChatMessage::user(feedback_request(&dialogue)),
        ];

        let reply = self
            .upstream
            .complete(messages, SamplingParams::EVALUATION)
            .await?;
        let reply = reply.trim();
        info!("Feedback reply received ({} bytes)", reply.len());

        parse_feedback(reply).map_err(|e| {
            error!("Feedback parse failed: {} (raw: {})", e, reply);
            e
        })
    }
}
