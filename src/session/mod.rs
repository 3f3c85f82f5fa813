//! Interview session management
//!
//! This module provides the `InterviewSession` state machine that sequences:
//! - Setup (name, interview type, job role, question count)
//! - Question/answer turns relayed to the interviewer model
//! - Termination and feedback retrieval
//! - Webcam capture and recording, speech input and per-question timing
//!
//! `SessionDriver` runs the machine against real collaborators.

mod config;
mod driver;
mod error;
mod events;
mod media;
mod session;
mod stats;
mod voice;

pub use config::{SessionConfig, DEFAULT_MAX_QUESTIONS, MAX_NAME_CHARS, QUESTION_PRESETS};
pub use driver::{
    CaptureDevice, Collaborators, InterviewBackend, SessionDriver, SpeechEngine, VideoUploader,
};
pub use error::{DeviceAccessError, SessionError, UploadError};
pub use events::{Command, MediaEvent, MediaStream, SessionEvent, Ticket, VoiceEvent};
pub use media::{CaptureMode, MediaCapture, RecordingArtifact, UploadStatus, WEBCAM_NOT_STARTED};
pub use session::{InterviewSession, Phase, SessionResults};
pub use stats::{format_clock, PaceHint, QuestionTimer, QuestionTiming};
pub use voice::{DraftUpdate, VoiceInput, SPEECH_ERROR_PREFIX};
