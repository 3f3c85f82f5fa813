use thiserror::Error;

/// Failures while relaying a conversation to the upstream chat-completion API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelayError {
    /// No API credential configured
    #[error("Upstream API key is not configured: {0}")]
    Configuration(String),

    /// Transport failure or non-success HTTP status from the upstream
    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable {
        /// Upstream HTTP status, `None` for transport failures
        status: Option<u16>,
        message: String,
    },

    /// Reply lacked the expected `choices[0].message.content`
    #[error("Malformed upstream response")]
    MalformedUpstreamResponse { raw: String },

    /// Evaluation reply was not a valid feedback object
    #[error("Failed to parse feedback: {reason}")]
    FeedbackParse { raw: String, reason: String },
}

impl RelayError {
    /// Raw upstream text for diagnosis, when there is one
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            RelayError::MalformedUpstreamResponse { raw } => Some(raw),
            RelayError::FeedbackParse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
