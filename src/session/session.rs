use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::SessionConfig;
use super::events::{Command, MediaEvent, SessionEvent, Ticket, VoiceEvent};
use super::media::{MediaCapture, RecordingArtifact};
use super::stats::{PaceHint, QuestionTimer, QuestionTiming};
use super::voice::{DraftUpdate, VoiceInput};
use crate::llm::{Feedback, RelayError};
use crate::prompt::InterviewSelection;
use crate::transcript::{ChatMessage, Speaker, Transcript};

/// Coarse position in the interview flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Collecting name, type, role and question count
    Setup,
    /// Question/answer turns
    Active,
    /// Last answer submitted, waiting for (or retrying) feedback
    Ending,
    /// Feedback available
    Ended,
}

/// Summary shown once the session has ended
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResults<'a> {
    pub feedback: &'a Feedback,
    pub answered: usize,
    pub average_secs: u32,
    pub pace: Option<PaceHint>,
    pub recording: Option<&'a RecordingArtifact>,
}

/// Interview session state machine
///
/// All input arrives through [`InterviewSession::handle`]; every side effect
/// is returned as a [`Command`]. At most one relay exchange is in flight.
#[derive(Debug)]
pub struct InterviewSession {
    /// Bumped on restart so stale async results can be recognised
    epoch: u64,
    next_ticket_id: u64,

    phase: Phase,
    config: Option<SessionConfig>,

    /// Interviewer greeting; sent upstream ahead of the transcript
    opening: Option<String>,
    transcript: Transcript,

    /// Question currently being answered, starting at 1
    question_count: u32,
    draft: String,
    in_flight: Option<Ticket>,
    paused: bool,

    timer: QuestionTimer,
    timing: QuestionTiming,

    feedback: Option<Feedback>,
    evaluation_error: Option<String>,
    notice: Option<String>,

    media: MediaCapture,
    voice: VoiceInput,
}

impl InterviewSession {
    pub fn new(speech_supported: bool) -> Self {
        Self {
            epoch: 0,
            next_ticket_id: 0,
            phase: Phase::Setup,
            config: None,
            opening: None,
            transcript: Transcript::new(),
            question_count: 0,
            draft: String::new(),
            in_flight: None,
            paused: false,
            timer: QuestionTimer::default(),
            timing: QuestionTiming::default(),
            feedback: None,
            evaluation_error: None,
            notice: None,
            media: MediaCapture::new(),
            voice: VoiceInput::new(speech_supported),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    pub fn opening(&self) -> Option<&str> {
        self.opening.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// An exchange with the relay is outstanding
    pub fn is_awaiting_reply(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn timer(&self) -> &QuestionTimer {
        &self.timer
    }

    pub fn timing(&self) -> &QuestionTiming {
        &self.timing
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn evaluation_error(&self) -> Option<&str> {
        self.evaluation_error.as_deref()
    }

    /// Closing notice shown while feedback is prepared
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn media(&self) -> &MediaCapture {
        &self.media
    }

    pub fn voice(&self) -> &VoiceInput {
        &self.voice
    }

    /// Per-question timer should be ticking
    pub fn timer_running(&self) -> bool {
        self.phase == Phase::Active && !self.paused && self.in_flight.is_none()
    }

    /// Answer field and voice toggle accept input
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Active && self.in_flight.is_none()
    }

    pub fn results(&self) -> Option<SessionResults<'_>> {
        let feedback = self.feedback.as_ref()?;
        Some(SessionResults {
            feedback,
            answered: self.timing.len(),
            average_secs: self.timing.average_secs(),
            pace: self.timing.pace(),
            recording: self.media.artifact(),
        })
    }

    /// Wire messages for the relay: greeting followed by the transcript
    pub fn conversation(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        if let Some(opening) = &self.opening {
            messages.push(ChatMessage::assistant(opening.clone()));
        }
        messages.extend(self.transcript.to_messages());
        messages
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Apply one event and return the side effects it requires
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Command> {
        match event {
            SessionEvent::Start(config) => self.start(config),
            SessionEvent::DraftChanged(text) => {
                if self.accepts_input() {
                    self.draft = text;
                }
                Vec::new()
            }
            SessionEvent::Submit => self.submit(),
            SessionEvent::QuestionReceived { ticket, result } => {
                self.question_received(ticket, result)
            }
            SessionEvent::FeedbackReceived { ticket, result } => {
                self.feedback_received(ticket, result)
            }
            SessionEvent::RetryFeedback => self.retry_feedback(),
            SessionEvent::TogglePause => {
                if self.phase == Phase::Active {
                    self.paused = !self.paused;
                    info!("Session {}", if self.paused { "paused" } else { "resumed" });
                }
                Vec::new()
            }
            SessionEvent::Tick => {
                if self.timer_running() {
                    self.timer.tick();
                }
                Vec::new()
            }
            SessionEvent::Restart => self.restart(),
            SessionEvent::Media(event) => self.handle_media(event),
            SessionEvent::Voice(event) => self.handle_voice(event),
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket_id += 1;
        Ticket {
            epoch: self.epoch,
            id: self.next_ticket_id,
        }
    }

    fn selection(&self) -> InterviewSelection {
        self.config
            .as_ref()
            .map(|c| c.selection)
            .unwrap_or_default()
    }

    fn start(&mut self, config: SessionConfig) -> Vec<Command> {
        if self.phase != Phase::Setup {
            warn!("Start ignored in phase {:?}", self.phase);
            return Vec::new();
        }

        let config = match config.validated() {
            Ok(config) => config,
            Err(e) => return vec![Command::Warn(e.to_string())],
        };

        info!(
            "Interview started for {} ({}/{}, {} questions)",
            config.candidate_name,
            config.selection.interview_type.as_str(),
            config.selection.job_role.as_str(),
            config.max_questions
        );

        self.opening = Some(config.greeting());
        self.config = Some(config);
        self.phase = Phase::Active;
        self.question_count = 1;
        self.timer.reset();
        Vec::new()
    }

    fn submit(&mut self) -> Vec<Command> {
        if !self.accepts_input() {
            debug!(
                "Submit ignored (phase {:?}, in flight {})",
                self.phase,
                self.in_flight.is_some()
            );
            return Vec::new();
        }
        if self.paused {
            return vec![Command::Warn("면접이 일시정지되었습니다.".to_string())];
        }

        let answer = self.draft.trim().to_string();
        if answer.is_empty() {
            return Vec::new();
        }

        let mut commands = self.voice.stop();

        self.transcript.push(Speaker::Candidate, answer);
        self.timing.record(self.timer.take());
        self.draft.clear();

        let max_questions = self
            .config
            .as_ref()
            .map(|c| c.max_questions)
            .unwrap_or(1);

        if self.question_count >= max_questions {
            commands.extend(self.begin_evaluation());
            return commands;
        }

        let ticket = self.issue_ticket();
        self.in_flight = Some(ticket);
        commands.push(Command::RequestQuestion {
            ticket,
            messages: self.conversation(),
            selection: self.selection(),
        });
        commands
    }

    fn question_received(
        &mut self,
        ticket: Ticket,
        result: Result<String, RelayError>,
    ) -> Vec<Command> {
        if self.phase != Phase::Active || self.in_flight != Some(ticket) {
            debug!("Discarding stale interviewer reply (epoch {})", ticket.epoch);
            return Vec::new();
        }
        self.in_flight = None;

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                warn!("Interviewer reply failed: {}", e);
                self.apology().to_string()
            }
        };

        self.transcript.push(Speaker::Interviewer, text);
        self.question_count += 1;
        Vec::new()
    }

    fn apology(&self) -> &'static str {
        self.config
            .as_ref()
            .map(|c| c.apology())
            .unwrap_or("죄송합니다. 서버와의 연결에 문제가 발생했습니다.")
    }

    fn begin_evaluation(&mut self) -> Vec<Command> {
        info!(
            "Final answer received after {} questions, requesting feedback",
            self.question_count
        );
        self.phase = Phase::Ending;
        self.paused = false;
        self.notice = self.config.as_ref().map(|c| c.closing_notice().to_string());

        let upload_ticket = self.issue_ticket();
        let mut commands = self.media.stop_recording(upload_ticket);
        commands.extend(self.request_feedback());
        commands
    }

    fn request_feedback(&mut self) -> Vec<Command> {
        let ticket = self.issue_ticket();
        self.in_flight = Some(ticket);
        self.evaluation_error = None;
        vec![Command::RequestFeedback {
            ticket,
            messages: self.conversation(),
            selection: self.selection(),
        }]
    }

    fn feedback_received(
        &mut self,
        ticket: Ticket,
        result: Result<Feedback, RelayError>,
    ) -> Vec<Command> {
        if self.phase != Phase::Ending || self.in_flight != Some(ticket) {
            debug!("Discarding stale feedback (epoch {})", ticket.epoch);
            return Vec::new();
        }
        self.in_flight = None;

        match result {
            Ok(feedback) => {
                info!("Interview ended with score {}", feedback.score);
                self.feedback = Some(feedback);
                self.phase = Phase::Ended;
                Vec::new()
            }
            Err(e) => {
                warn!("Feedback request failed: {}", e);
                self.evaluation_error = Some(e.to_string());
                vec![Command::Warn("피드백 생성에 실패했습니다.".to_string())]
            }
        }
    }

    fn retry_feedback(&mut self) -> Vec<Command> {
        if self.phase != Phase::Ending || self.in_flight.is_some() {
            return Vec::new();
        }
        info!("Retrying feedback request");
        self.request_feedback()
    }

    /// Reset to a fresh session, tearing down media and speech
    fn restart(&mut self) -> Vec<Command> {
        info!("Session restarted (epoch {} -> {})", self.epoch, self.epoch + 1);

        let mut commands = self.media.teardown();
        commands.extend(self.voice.stop());

        let epoch = self.epoch + 1;
        let next_ticket_id = self.next_ticket_id;
        *self = Self::new(self.voice.is_supported());
        self.epoch = epoch;
        self.next_ticket_id = next_ticket_id;

        commands
    }

    fn handle_media(&mut self, event: MediaEvent) -> Vec<Command> {
        match event {
            MediaEvent::StartRequested => {
                let ticket = self.issue_ticket();
                self.media.start(ticket)
            }
            MediaEvent::Granted { ticket, stream } => {
                if ticket.epoch != self.epoch {
                    return vec![Command::ReleaseMedia { stream }];
                }
                self.media.granted(ticket, stream)
            }
            MediaEvent::Denied { ticket, error } => self.media.denied(ticket, error),
            MediaEvent::StopRequested => {
                let ticket = self.issue_ticket();
                self.media.stop(ticket)
            }
            MediaEvent::RecordRequested => self.media.start_recording(),
            MediaEvent::Chunk(chunk) => {
                self.media.push_chunk(chunk);
                Vec::new()
            }
            MediaEvent::RecordStopRequested => {
                let ticket = self.issue_ticket();
                self.media.stop_recording(ticket)
            }
            MediaEvent::UploadFinished { ticket, result } => {
                self.media.upload_finished(ticket, result);
                Vec::new()
            }
        }
    }

    fn handle_voice(&mut self, event: VoiceEvent) -> Vec<Command> {
        let language = self
            .config
            .as_ref()
            .map(|c| c.speech_language())
            .unwrap_or("ko-KR");

        if matches!(event, VoiceEvent::Toggle) && !self.accepts_input() {
            return Vec::new();
        }

        let (update, commands) = self.voice.handle(event, language);
        if let DraftUpdate::Replace(text) = update {
            if self.accepts_input() {
                self.draft = text;
            }
        }
        commands
    }
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new(false)
    }
}
