use serde::{Deserialize, Serialize};

use super::error::SessionError;
use crate::prompt::{InterviewSelection, InterviewType, JobRole};

/// Question-count presets offered at setup (quick, standard, in-depth, expert)
pub const QUESTION_PRESETS: [u32; 4] = [5, 10, 15, 20];

pub const DEFAULT_MAX_QUESTIONS: u32 = 10;

pub const MAX_NAME_CHARS: usize = 20;

/// Configuration for an interview session, fixed once the session starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name the interviewer greets
    pub candidate_name: String,

    pub selection: InterviewSelection,

    /// Answers accepted before the session is evaluated
    pub max_questions: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            candidate_name: String::new(),
            selection: InterviewSelection::default(),
            max_questions: DEFAULT_MAX_QUESTIONS,
        }
    }
}

impl SessionConfig {
    pub fn new(
        candidate_name: impl Into<String>,
        interview_type: InterviewType,
        job_role: JobRole,
        max_questions: u32,
    ) -> Self {
        Self {
            candidate_name: candidate_name.into(),
            selection: InterviewSelection::new(interview_type, job_role),
            max_questions,
        }
    }

    /// Trim the name and check the setup constraints
    pub fn validated(mut self) -> Result<Self, SessionError> {
        self.candidate_name = self.candidate_name.trim().to_string();

        if self.candidate_name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.candidate_name.chars().count() > MAX_NAME_CHARS {
            return Err(SessionError::NameTooLong {
                max: MAX_NAME_CHARS,
            });
        }
        if self.max_questions == 0 {
            return Err(SessionError::NoQuestions);
        }

        Ok(self)
    }

    /// Interviewer's opening line
    pub fn greeting(&self) -> String {
        if self.selection.interview_type.is_english() {
            format!(
                "Hello {}! Let's begin your AI interview. Please start by introducing yourself.",
                self.candidate_name
            )
        } else {
            format!(
                "안녕하세요 {}님! AI 면접을 시작하겠습니다. 먼저 자기소개 부탁드립니다.",
                self.candidate_name
            )
        }
    }

    /// Speech recognition locale
    pub fn speech_language(&self) -> &'static str {
        if self.selection.interview_type.is_english() {
            "en-US"
        } else {
            "ko-KR"
        }
    }

    /// Stand-in interviewer message when the relay fails
    pub fn apology(&self) -> &'static str {
        if self.selection.interview_type.is_english() {
            "Sorry, there was a problem connecting to the server."
        } else {
            "죄송합니다. 서버와의 연결에 문제가 발생했습니다."
        }
    }

    /// Notice shown once the last answer is in
    pub fn closing_notice(&self) -> &'static str {
        if self.selection.interview_type.is_english() {
            "The interview is over. Please wait a moment for your results..."
        } else {
            "면접이 종료되었습니다. 잠시만 기다려주시면 면접 분석 결과를 보여드리겠습니다..."
        }
    }
}
