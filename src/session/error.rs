use thiserror::Error;

/// Setup rejected before a session could start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Candidate name is required")]
    EmptyName,

    #[error("Candidate name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("At least one question is required")]
    NoQuestions,
}

/// Camera, microphone or speech engine could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceAccessError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Device unavailable: {0}")]
    Unavailable(String),

    #[error("Not supported on this platform")]
    Unsupported,
}

/// Recording could not be persisted server-side
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Upload rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Upload transport error: {0}")]
    Transport(String),

    #[error("Upload storage error: {0}")]
    Storage(String),
}
