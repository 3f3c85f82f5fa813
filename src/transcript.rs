use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Candidate,
    Interviewer,
}

impl Speaker {
    /// Label used in the dialogue block sent for evaluation
    pub fn dialogue_label(&self) -> &'static str {
        match self {
            Speaker::Candidate => "지원자",
            Speaker::Interviewer => "AI 면접관",
        }
    }

    pub fn role(&self) -> ChatRole {
        match self {
            Speaker::Candidate => ChatRole::User,
            Speaker::Interviewer => ChatRole::Assistant,
        }
    }
}

/// A single utterance in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,

    pub text: String,

    /// Position in the transcript (0-indexed)
    pub sequence: usize,

    pub spoken_at: DateTime<Utc>,
}

/// Role of a message in the chat-completion wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// `{role, content}` pair as exchanged with `/api/chat` and the upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only ordered history of turns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a transcript from wire messages; system messages are dropped
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        let mut transcript = Self::new();
        for msg in messages {
            match msg.role {
                ChatRole::User => {
                    transcript.push(Speaker::Candidate, msg.content.clone());
                }
                ChatRole::Assistant => {
                    transcript.push(Speaker::Interviewer, msg.content.clone());
                }
                ChatRole::System => {}
            }
        }
        transcript
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) -> &Turn {
        let sequence = self.turns.len();
        self.turns.push(Turn {
            speaker,
            text: text.into(),
            sequence,
            spoken_at: Utc::now(),
        });
        &self.turns[sequence]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn count(&self, speaker: Speaker) -> usize {
        self.turns.iter().filter(|t| t.speaker == speaker).count()
    }

    /// Wire representation, one `{role, content}` per turn
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.turns
            .iter()
            .map(|turn| ChatMessage {
                role: turn.speaker.role(),
                content: turn.text.clone(),
            })
            .collect()
    }

    /// "지원자: ... / AI 면접관: ..." block, one line per turn
    pub fn render_dialogue(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.speaker.dialogue_label(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_increase() {
        let mut transcript = Transcript::new();
        transcript.push(Speaker::Interviewer, "Tell me about yourself");
        transcript.push(Speaker::Candidate, "I build backends");

        let seqs: Vec<usize> = transcript.turns().iter().map(|t| t.sequence).collect();
        assert_eq!(seqs, vec![0, 1]);
        assert_eq!(transcript.count(Speaker::Candidate), 1);
    }

    #[test]
    fn test_wire_roles() {
        let mut transcript = Transcript::new();
        transcript.push(Speaker::Candidate, "hello");
        transcript.push(Speaker::Interviewer, "hi");

        let json = serde_json::to_string(&transcript.to_messages()).unwrap();
        assert_eq!(
            json,
            r#"[{"role":"user","content":"hello"},{"role":"assistant","content":"hi"}]"#
        );
    }

    #[test]
    fn test_from_messages_skips_system() {
        let messages = vec![
            ChatMessage::system("be nice"),
            ChatMessage::assistant("Introduce yourself"),
            ChatMessage::user("I am Kim"),
        ];
        let transcript = Transcript::from_messages(&messages);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].speaker, Speaker::Interviewer);
    }

    #[test]
    fn test_render_dialogue() {
        let mut transcript = Transcript::new();
        transcript.push(Speaker::Interviewer, "자기소개 부탁드립니다.");
        transcript.push(Speaker::Candidate, "안녕하세요.");
        assert_eq!(
            transcript.render_dialogue(),
            "AI 면접관: 자기소개 부탁드립니다.\n지원자: 안녕하세요."
        );
    }
}
