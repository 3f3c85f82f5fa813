use tracing::{debug, info, warn};

use super::events::{Command, VoiceEvent};

pub const SPEECH_ERROR_PREFIX: &str = "음성 인식 오류";

/// Speech-to-text toggle feeding the answer draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceInput {
    supported: bool,
    listening: bool,
}

/// What a voice event did to the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftUpdate {
    Unchanged,
    Replace(String),
}

impl VoiceInput {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            listening: false,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Start or stop recognition; no-op when unsupported
    pub fn toggle(&mut self, language: &'static str) -> Vec<Command> {
        if !self.supported {
            debug!("Speech recognition unsupported, toggle ignored");
            return Vec::new();
        }

        if self.listening {
            self.listening = false;
            vec![Command::StopRecognition]
        } else {
            info!("Speech recognition started ({})", language);
            self.listening = true;
            vec![Command::StartRecognition { language }]
        }
    }

    /// Force the idle state, stopping the engine if it was running
    pub fn stop(&mut self) -> Vec<Command> {
        if std::mem::take(&mut self.listening) {
            vec![Command::StopRecognition]
        } else {
            Vec::new()
        }
    }

    pub fn handle(
        &mut self,
        event: VoiceEvent,
        language: &'static str,
    ) -> (DraftUpdate, Vec<Command>) {
        match event {
            VoiceEvent::Toggle => (DraftUpdate::Unchanged, self.toggle(language)),
            VoiceEvent::Partial(text) if self.listening => {
                (DraftUpdate::Replace(text), Vec::new())
            }
            VoiceEvent::Final(text) if self.listening => {
                self.listening = false;
                (DraftUpdate::Replace(text), Vec::new())
            }
            VoiceEvent::Error(reason) => {
                if !std::mem::take(&mut self.listening) {
                    return (DraftUpdate::Unchanged, Vec::new());
                }
                warn!("Speech recognition error: {}", reason);
                let message = format!("{}: {}", SPEECH_ERROR_PREFIX, reason);
                (DraftUpdate::Unchanged, vec![Command::Warn(message)])
            }
            VoiceEvent::Ended => {
                self.listening = false;
                (DraftUpdate::Unchanged, Vec::new())
            }
            VoiceEvent::Partial(_) | VoiceEvent::Final(_) => (DraftUpdate::Unchanged, Vec::new()),
        }
    }
}
