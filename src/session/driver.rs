use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::error::{DeviceAccessError, UploadError};
use super::events::{Command, MediaEvent, MediaStream, SessionEvent, VoiceEvent};
use super::session::InterviewSession;
use crate::llm::{Feedback, LlmRelay, RelayError};
use crate::prompt::InterviewSelection;
use crate::transcript::ChatMessage;
use crate::upload::StoredVideo;

/// Conversation backend: in-process relay or the HTTP API
#[async_trait]
pub trait InterviewBackend: Send + Sync {
    async fn next_question(
        &self,
        messages: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<String, RelayError>;

    async fn evaluate(
        &self,
        messages: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<Feedback, RelayError>;
}

#[async_trait]
impl InterviewBackend for LlmRelay {
    async fn next_question(
        &self,
        messages: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<String, RelayError> {
        LlmRelay::next_question(self, messages, selection).await
    }

    async fn evaluate(
        &self,
        messages: &[ChatMessage],
        selection: &InterviewSelection,
    ) -> Result<Feedback, RelayError> {
        LlmRelay::evaluate(self, messages, selection).await
    }
}

/// Camera + microphone provider
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Prompt for access and open the stream
    async fn open(&self) -> Result<MediaStream, DeviceAccessError>;

    /// Stop every track of the stream
    fn close(&self, stream: &MediaStream);
}

/// Speech-to-text engine; results are delivered as `VoiceEvent`s
pub trait SpeechEngine: Send + Sync {
    fn is_supported(&self) -> bool;

    fn start(
        &self,
        language: &str,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Result<(), DeviceAccessError>;

    fn stop(&self);
}

/// Destination for finished recordings
#[async_trait]
pub trait VideoUploader: Send + Sync {
    async fn upload(&self, blob: Vec<u8>) -> Result<StoredVideo, UploadError>;
}

/// Collaborators a driver runs commands against
#[derive(Clone)]
pub struct Collaborators {
    pub backend: Arc<dyn InterviewBackend>,
    pub camera: Arc<dyn CaptureDevice>,
    pub speech: Arc<dyn SpeechEngine>,
    pub uploader: Arc<dyn VideoUploader>,
}

/// Runs an `InterviewSession` against real collaborators
///
/// Events are applied one at a time; async work is spawned and its result
/// is fed back through the driver's channel.
pub struct SessionDriver {
    session: InterviewSession,
    collaborators: Collaborators,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    /// Spawned tasks whose completion event has not arrived yet
    pending: usize,
    warnings: Vec<String>,
    clock: Option<JoinHandle<()>>,
}

impl SessionDriver {
    pub fn new(collaborators: Collaborators) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session = InterviewSession::new(collaborators.speech.is_supported());

        Self {
            session,
            collaborators,
            events_tx,
            events_rx,
            pending: 0,
            warnings: Vec::new(),
            clock: None,
        }
    }

    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    /// Sender for device callbacks (recorder chunks, speech results)
    pub fn sender(&self) -> mpsc::UnboundedSender<SessionEvent> {
        self.events_tx.clone()
    }

    /// Inline warnings raised since the last call
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    pub fn has_pending_work(&self) -> bool {
        self.pending > 0
    }

    /// Apply an event and run the commands it produced
    pub fn dispatch(&mut self, event: SessionEvent) {
        if event.is_completion() {
            self.pending = self.pending.saturating_sub(1);
        }

        let commands = self.session.handle(event);
        for command in commands {
            self.execute(command);
        }
    }

    /// Wait for the next queued event and apply it
    pub async fn step(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Apply queued events until no spawned work is outstanding
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            if !self.step().await {
                break;
            }
        }
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
        }
    }

    /// Start the one-second tick source, replacing any previous one
    pub fn start_clock(&mut self, period: Duration) {
        self.stop_clock();

        let tx = self.events_tx.clone();
        self.clock = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(SessionEvent::Tick).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop_clock(&mut self) {
        if let Some(handle) = self.clock.take() {
            handle.abort();
        }
    }

    fn execute(&mut self, command: Command) {
        let tx = self.events_tx.clone();

        match command {
            Command::RequestQuestion {
                ticket,
                messages,
                selection,
            } => {
                self.pending += 1;
                let backend = Arc::clone(&self.collaborators.backend);
                tokio::spawn(async move {
                    let result = backend.next_question(&messages, &selection).await;
                    let _ = tx.send(SessionEvent::QuestionReceived { ticket, result });
                });
            }
            Command::RequestFeedback {
                ticket,
                messages,
                selection,
            } => {
                self.pending += 1;
                let backend = Arc::clone(&self.collaborators.backend);
                tokio::spawn(async move {
                    let result = backend.evaluate(&messages, &selection).await;
                    let _ = tx.send(SessionEvent::FeedbackReceived { ticket, result });
                });
            }
            Command::AcquireMedia { ticket } => {
                self.pending += 1;
                let camera = Arc::clone(&self.collaborators.camera);
                tokio::spawn(async move {
                    let event = match camera.open().await {
                        Ok(stream) => MediaEvent::Granted { ticket, stream },
                        Err(error) => MediaEvent::Denied { ticket, error },
                    };
                    let _ = tx.send(SessionEvent::Media(event));
                });
            }
            Command::ReleaseMedia { stream } => {
                debug!("Closing media stream {}", stream.id);
                self.collaborators.camera.close(&stream);
            }
            Command::UploadRecording { ticket, blob } => {
                self.pending += 1;
                let uploader = Arc::clone(&self.collaborators.uploader);
                tokio::spawn(async move {
                    let result = uploader.upload(blob).await;
                    let _ = tx.send(SessionEvent::Media(MediaEvent::UploadFinished {
                        ticket,
                        result,
                    }));
                });
            }
            Command::StartRecognition { language } => {
                if let Err(e) = self.collaborators.speech.start(language, tx.clone()) {
                    warn!("Speech recognition failed to start: {}", e);
                    let _ = tx.send(SessionEvent::Voice(VoiceEvent::Error(e.to_string())));
                }
            }
            Command::StopRecognition => {
                self.collaborators.speech.stop();
            }
            Command::Warn(message) => {
                info!("Notice: {}", message);
                self.warnings.push(message);
            }
        }
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.stop_clock();
    }
}
