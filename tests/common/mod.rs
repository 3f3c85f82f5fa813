// Shared fakes for integration tests
//
// - ScriptedUpstream: ChatCompletion that replays queued replies
// - spawn_fake_openai: in-process axum server shaped like /v1/chat/completions
// - FakeCamera / FakeSpeech / FakeUploader: session collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{http::StatusCode, routing::post, Json, Router};
use mock_interview::llm::{ChatCompletion, RelayError, SamplingParams};
use mock_interview::session::{
    CaptureDevice, DeviceAccessError, MediaStream, SessionEvent, SpeechEngine, UploadError,
    VideoUploader,
};
use mock_interview::{create_router, AppState, ChatMessage, LlmRelay, StoredVideo, VideoStore};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub const FEEDBACK_JSON: &str = r#"{"score":82,"strengths":["Clear structure","Concrete examples"],"improvements":["Be concise","Quantify impact"],"keywords":["Rust","ownership","testing","teamwork","performance"],"summary":"Solid technical interview"}"#;

/// Replays queued replies; records every request
#[derive(Default)]
pub struct ScriptedUpstream {
    replies: Mutex<VecDeque<Result<String, RelayError>>>,
    pub calls: Mutex<Vec<(Vec<ChatMessage>, SamplingParams)>>,
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<Result<String, RelayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, reply: Result<String, RelayError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn evaluation_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, params)| *params == SamplingParams::EVALUATION)
            .count()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedUpstream {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
    ) -> Result<String, RelayError> {
        self.calls.lock().unwrap().push((messages, params));
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            if params == SamplingParams::EVALUATION {
                Ok(FEEDBACK_JSON.to_string())
            } else {
                Ok("Tell me about a hard bug you fixed.".to_string())
            }
        })
    }

    fn has_credential(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Serve a fixed reply at `/v1/chat/completions`; returns the URL and captured request bodies
pub async fn spawn_fake_openai(status: u16, body: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&requests);

    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |Json(req): Json<Value>| {
            let captured = Arc::clone(&captured);
            let body = body.clone();
            async move {
                captured.lock().unwrap().push(req);
                (StatusCode::from_u16(status).unwrap(), Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1/chat/completions", addr), requests)
}

pub async fn test_router(upstream: Arc<dyn ChatCompletion>, upload_dir: &Path) -> Router {
    let videos = VideoStore::new(upload_dir, "http://localhost:3001")
        .await
        .unwrap();
    create_router(AppState::new(LlmRelay::new(upstream), videos), 1024 * 1024)
}

/// Serve the API on an ephemeral port; returns the base URL
pub async fn spawn_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub struct FakeCamera {
    pub deny: bool,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
}

impl FakeCamera {
    pub fn granting() -> Self {
        Self {
            deny: false,
            opened: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
        }
    }

    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::granting()
        }
    }

    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureDevice for FakeCamera {
    async fn open(&self) -> Result<MediaStream, DeviceAccessError> {
        if self.deny {
            return Err(DeviceAccessError::PermissionDenied(
                "NotAllowedError".to_string(),
            ));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(MediaStream::new("Integrated Camera"))
    }

    fn close(&self, _stream: &MediaStream) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct FakeSpeech {
    pub supported: bool,
    pub deny: bool,
    pub languages: Mutex<Vec<String>>,
    pub sender: Mutex<Option<mpsc::UnboundedSender<SessionEvent>>>,
    pub stops: AtomicUsize,
}

impl FakeSpeech {
    pub fn supported() -> Self {
        Self {
            supported: true,
            ..Self::default()
        }
    }

    /// Supported, but the microphone permission is refused
    pub fn denying() -> Self {
        Self {
            supported: true,
            deny: true,
            ..Self::default()
        }
    }

    /// Deliver a recognition result the way the engine would
    pub fn emit(&self, event: mock_interview::session::VoiceEvent) {
        if let Some(tx) = self.sender.lock().unwrap().as_ref() {
            tx.send(SessionEvent::Voice(event)).unwrap();
        }
    }
}

impl SpeechEngine for FakeSpeech {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn start(
        &self,
        language: &str,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Result<(), DeviceAccessError> {
        self.languages.lock().unwrap().push(language.to_string());
        if self.deny {
            return Err(DeviceAccessError::PermissionDenied(
                "not-allowed".to_string(),
            ));
        }
        *self.sender.lock().unwrap() = Some(events);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeUploader {
    pub fail: bool,
    pub uploads: Mutex<Vec<Vec<u8>>>,
}

impl FakeUploader {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VideoUploader for FakeUploader {
    async fn upload(&self, blob: Vec<u8>) -> Result<StoredVideo, UploadError> {
        let size = blob.len() as u64;
        self.uploads.lock().unwrap().push(blob);
        if self.fail {
            return Err(UploadError::Transport("connection refused".to_string()));
        }
        Ok(StoredVideo {
            filename: "interview_1.webm".to_string(),
            path: "/uploads/videos/interview_1.webm".to_string(),
            size,
            url: "http://localhost:3001/uploads/videos/interview_1.webm".to_string(),
        })
    }
}
