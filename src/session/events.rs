//! Messages consumed and produced by the session state machine
//!
//! Everything asynchronous (relay replies, device permission prompts,
//! recorder chunks, speech results, uploads, timer ticks) arrives as a
//! `SessionEvent`. Side effects leave as `Command`s for a driver to run.

use uuid::Uuid;

use super::config::SessionConfig;
use super::error::{DeviceAccessError, UploadError};
use crate::llm::{Feedback, RelayError};
use crate::prompt::InterviewSelection;
use crate::transcript::ChatMessage;
use crate::upload::StoredVideo;

/// Correlates an async result with the request that caused it.
///
/// `epoch` changes on every restart, so results issued by an earlier
/// session never match the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub(crate) epoch: u64,
    pub(crate) id: u64,
}

impl Ticket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Handle to an acquired camera + microphone stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    pub id: Uuid,
    /// Video track label shown next to the preview
    pub label: String,
}

impl MediaStream {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MediaEvent {
    /// User pressed "start webcam"
    StartRequested,
    Granted { ticket: Ticket, stream: MediaStream },
    Denied { ticket: Ticket, error: DeviceAccessError },
    /// User pressed "stop webcam"
    StopRequested,
    RecordRequested,
    /// Encoded data from the recorder
    Chunk(Vec<u8>),
    RecordStopRequested,
    UploadFinished {
        ticket: Ticket,
        result: Result<StoredVideo, UploadError>,
    },
}

#[derive(Debug, Clone)]
pub enum VoiceEvent {
    Toggle,
    /// Interim recognition text
    Partial(String),
    /// Final recognition text
    Final(String),
    Error(String),
    /// Engine stopped on its own
    Ended,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Start(SessionConfig),
    /// Candidate edited the answer field
    DraftChanged(String),
    Submit,
    QuestionReceived {
        ticket: Ticket,
        result: Result<String, RelayError>,
    },
    FeedbackReceived {
        ticket: Ticket,
        result: Result<Feedback, RelayError>,
    },
    RetryFeedback,
    TogglePause,
    /// One second elapsed
    Tick,
    Restart,
    Media(MediaEvent),
    Voice(VoiceEvent),
}

impl SessionEvent {
    /// Result of work a driver started
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            SessionEvent::QuestionReceived { .. }
                | SessionEvent::FeedbackReceived { .. }
                | SessionEvent::Media(MediaEvent::Granted { .. })
                | SessionEvent::Media(MediaEvent::Denied { .. })
                | SessionEvent::Media(MediaEvent::UploadFinished { .. })
        )
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RequestQuestion {
        ticket: Ticket,
        messages: Vec<ChatMessage>,
        selection: InterviewSelection,
    },
    RequestFeedback {
        ticket: Ticket,
        messages: Vec<ChatMessage>,
        selection: InterviewSelection,
    },
    AcquireMedia {
        ticket: Ticket,
    },
    ReleaseMedia {
        stream: MediaStream,
    },
    UploadRecording {
        ticket: Ticket,
        blob: Vec<u8>,
    },
    StartRecognition {
        language: &'static str,
    },
    StopRecognition,
    /// Inline, non-fatal message for the candidate
    Warn(String),
}
