// Camera/microphone capture and recording lifecycle
//
// Idle -> (start) -> Active -> (start_recording) -> Recording
// Recording -> (stop_recording) -> Active -> (stop) -> Idle
//
// Device acquisition is asynchronous: `start` emits `AcquireMedia` and the
// capture waits in an internal acquiring state until the matching grant or
// denial arrives. A grant that no longer matches is handed back for release.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::error::{DeviceAccessError, UploadError};
use super::events::{Command, MediaStream, Ticket};
use crate::upload::StoredVideo;

pub const WEBCAM_NOT_STARTED: &str = "먼저 웹캠을 시작해주세요.";

/// Observable capture mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Idle,
    Active,
    Recording,
}

#[derive(Debug)]
enum CaptureState {
    Idle,
    Acquiring(Ticket),
    Active(MediaStream),
    Recording {
        stream: MediaStream,
        chunks: Vec<Vec<u8>>,
    },
}

/// Result of one recording cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingArtifact {
    pub blob: Vec<u8>,
    /// Local playback handle, valid until the next recording
    pub local_url: String,
    /// Set once the upload succeeds
    pub server_url: Option<String>,
    /// Suggested file name for a local download
    pub download_name: String,
}

impl RecordingArtifact {
    fn new(blob: Vec<u8>) -> Self {
        Self {
            blob,
            local_url: format!("blob:mock-interview/{}", Uuid::new_v4()),
            server_url: None,
            download_name: format!("interview_{}.webm", Utc::now().format("%Y-%m-%d")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Idle,
    Uploading,
    Saved,
    Failed,
}

impl UploadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "",
            UploadStatus::Uploading => "업로드 중...",
            UploadStatus::Saved => "저장 완료!",
            UploadStatus::Failed => "저장 실패",
        }
    }
}

/// Camera + microphone capture with a single recording slot
#[derive(Debug)]
pub struct MediaCapture {
    state: CaptureState,
    artifact: Option<RecordingArtifact>,
    upload_status: UploadStatus,
    pending_upload: Option<Ticket>,
    last_error: Option<DeviceAccessError>,
}

impl Default for MediaCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaCapture {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            artifact: None,
            upload_status: UploadStatus::Idle,
            pending_upload: None,
            last_error: None,
        }
    }

    pub fn mode(&self) -> CaptureMode {
        match self.state {
            CaptureState::Idle | CaptureState::Acquiring(_) => CaptureMode::Idle,
            CaptureState::Active(_) => CaptureMode::Active,
            CaptureState::Recording { .. } => CaptureMode::Recording,
        }
    }

    pub fn is_acquiring(&self) -> bool {
        matches!(self.state, CaptureState::Acquiring(_))
    }

    /// Stream currently attached to the preview
    pub fn preview(&self) -> Option<&MediaStream> {
        match &self.state {
            CaptureState::Active(stream) | CaptureState::Recording { stream, .. } => Some(stream),
            _ => None,
        }
    }

    pub fn artifact(&self) -> Option<&RecordingArtifact> {
        self.artifact.as_ref()
    }

    pub fn upload_status(&self) -> UploadStatus {
        self.upload_status
    }

    pub fn last_error(&self) -> Option<&DeviceAccessError> {
        self.last_error.as_ref()
    }

    /// Request camera and microphone access
    pub fn start(&mut self, ticket: Ticket) -> Vec<Command> {
        match self.state {
            CaptureState::Idle => {
                info!("Requesting camera and microphone");
                self.state = CaptureState::Acquiring(ticket);
                vec![Command::AcquireMedia { ticket }]
            }
            _ => {
                warn!("Webcam start ignored: capture already {:?}", self.mode());
                Vec::new()
            }
        }
    }

    pub fn granted(&mut self, ticket: Ticket, stream: MediaStream) -> Vec<Command> {
        match self.state {
            CaptureState::Acquiring(expected) if expected == ticket => {
                info!("Webcam active: {}", stream.label);
                self.last_error = None;
                self.state = CaptureState::Active(stream);
                Vec::new()
            }
            _ => {
                info!("Releasing stale media stream {}", stream.id);
                vec![Command::ReleaseMedia { stream }]
            }
        }
    }

    pub fn denied(&mut self, ticket: Ticket, error: DeviceAccessError) -> Vec<Command> {
        match self.state {
            CaptureState::Acquiring(expected) if expected == ticket => {
                warn!("Webcam unavailable: {}", error);
                self.state = CaptureState::Idle;
                let message = format!("웹캠 오류: {}", error);
                self.last_error = Some(error);
                vec![Command::Warn(message)]
            }
            _ => Vec::new(),
        }
    }

    /// Release all tracks; finalizes an in-progress recording first
    pub fn stop(&mut self, upload_ticket: Ticket) -> Vec<Command> {
        let mut commands = self.stop_recording(upload_ticket);

        match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Active(stream) => {
                info!("Webcam stopped");
                commands.push(Command::ReleaseMedia { stream });
            }
            CaptureState::Recording { stream, .. } => {
                commands.push(Command::ReleaseMedia { stream });
            }
            CaptureState::Acquiring(_) | CaptureState::Idle => {}
        }

        commands
    }

    pub fn start_recording(&mut self) -> Vec<Command> {
        match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Active(stream) => {
                info!("Recording started");
                self.state = CaptureState::Recording {
                    stream,
                    chunks: Vec::new(),
                };
                Vec::new()
            }
            state @ (CaptureState::Idle | CaptureState::Acquiring(_)) => {
                self.state = state;
                vec![Command::Warn(WEBCAM_NOT_STARTED.to_string())]
            }
            state @ CaptureState::Recording { .. } => {
                self.state = state;
                Vec::new()
            }
        }
    }

    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        if let CaptureState::Recording { chunks, .. } = &mut self.state {
            chunks.push(chunk);
        }
    }

    /// Finalize the recording and hand the blob to the uploader
    pub fn stop_recording(&mut self, upload_ticket: Ticket) -> Vec<Command> {
        let (stream, chunks) = match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Recording { stream, chunks } => (stream, chunks),
            other => {
                self.state = other;
                return Vec::new();
            }
        };

        let blob = chunks.concat();
        info!("Recording stopped ({} bytes)", blob.len());

        self.state = CaptureState::Active(stream);
        self.artifact = Some(RecordingArtifact::new(blob.clone()));
        self.upload_status = UploadStatus::Uploading;
        self.pending_upload = Some(upload_ticket);

        vec![Command::UploadRecording {
            ticket: upload_ticket,
            blob,
        }]
    }

    pub fn upload_finished(&mut self, ticket: Ticket, result: Result<StoredVideo, UploadError>) {
        if self.pending_upload != Some(ticket) {
            return;
        }
        self.pending_upload = None;

        match result {
            Ok(stored) => {
                info!("Recording saved as {}", stored.filename);
                if let Some(artifact) = self.artifact.as_mut() {
                    artifact.server_url = Some(stored.url);
                }
                self.upload_status = UploadStatus::Saved;
            }
            Err(e) => {
                warn!("Recording upload failed: {}", e);
                self.upload_status = UploadStatus::Failed;
            }
        }
    }

    /// Drop everything, discarding any in-progress recording
    pub fn teardown(&mut self) -> Vec<Command> {
        let commands = match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Active(stream) | CaptureState::Recording { stream, .. } => {
                vec![Command::ReleaseMedia { stream }]
            }
            CaptureState::Acquiring(_) | CaptureState::Idle => Vec::new(),
        };
        *self = Self::new();
        commands
    }
}
