use serde::{Deserialize, Serialize};

/// Answers averaging above this are flagged as too long (seconds)
pub const LONG_ANSWER_SECS: u32 = 180;

/// Answers averaging below this are flagged as too short (seconds)
pub const SHORT_ANSWER_SECS: u32 = 60;

/// Running per-question timer, advanced by one-second ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionTimer {
    elapsed_secs: u32,
}

impl QuestionTimer {
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn tick(&mut self) {
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
    }

    /// Read the value and reset to zero
    pub fn take(&mut self) -> u32 {
        std::mem::take(&mut self.elapsed_secs)
    }

    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
    }

    /// Current answer has run past the long-answer threshold
    pub fn is_overrunning(&self) -> bool {
        self.elapsed_secs > LONG_ANSWER_SECS
    }

    /// `m:ss`
    pub fn display(&self) -> String {
        format_clock(self.elapsed_secs)
    }
}

/// Advice derived from the average answer time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceHint {
    TooLong,
    TooShort,
    Balanced,
}

impl PaceHint {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PaceHint::TooLong => {
                Some("답변이 평균 3분 이상 소요되었습니다. 더 간결하게 답변하는 연습을 해보세요.")
            }
            PaceHint::TooShort => {
                Some("답변이 평균 1분 미만입니다. 더 구체적이고 상세한 답변을 해보세요.")
            }
            PaceHint::Balanced => None,
        }
    }
}

/// Seconds spent on each submitted answer, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTiming {
    samples: Vec<u32>,
}

impl QuestionTiming {
    pub fn record(&mut self, secs: u32) {
        self.samples.push(secs);
    }

    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn total_secs(&self) -> u64 {
        self.samples.iter().map(|&s| s as u64).sum()
    }

    /// Rounded mean, 0 when nothing was answered
    pub fn average_secs(&self) -> u32 {
        if self.samples.is_empty() {
            return 0;
        }
        (self.total_secs() as f64 / self.samples.len() as f64).round() as u32
    }

    pub fn pace(&self) -> Option<PaceHint> {
        if self.samples.is_empty() {
            return None;
        }
        let avg = self.average_secs();
        Some(if avg > LONG_ANSWER_SECS {
            PaceHint::TooLong
        } else if avg < SHORT_ANSWER_SECS {
            PaceHint::TooShort
        } else {
            PaceHint::Balanced
        })
    }
}

pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
