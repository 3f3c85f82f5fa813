use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::RelayError;

pub const MAX_STRENGTHS: usize = 2;
pub const MAX_IMPROVEMENTS: usize = 2;
pub const KEYWORD_COUNT: usize = 5;

/// Structured end-of-session evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Overall score, 0 to 100
    pub score: u8,

    pub strengths: Vec<String>,

    pub improvements: Vec<String>,

    pub keywords: Vec<String>,

    pub summary: String,
}

/// Shape the model is asked to produce, before validation
#[derive(Debug, Deserialize)]
struct RawFeedback {
    score: serde_json::Number,
    strengths: Vec<String>,
    improvements: Vec<String>,
    keywords: Vec<String>,
    summary: String,
}

/// Remove ```json / ``` markers wrapping the reply
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse and validate a model reply into `Feedback`
///
/// Missing fields, non-numeric or out-of-range scores and empty lists are
/// rejected. Lists longer than requested are cut to size.
pub fn parse_feedback(reply: &str) -> Result<Feedback, RelayError> {
    let cleaned = strip_code_fences(reply);

    let raw: RawFeedback =
        serde_json::from_str(&cleaned).map_err(|e| RelayError::FeedbackParse {
            raw: reply.to_string(),
            reason: e.to_string(),
        })?;

    let fail = |reason: String| RelayError::FeedbackParse {
        raw: reply.to_string(),
        reason,
    };

    let score = raw
        .score
        .as_f64()
        .map(f64::round)
        .filter(|s| (0.0..=100.0).contains(s))
        .ok_or_else(|| fail(format!("score {} is outside 0-100", raw.score)))?
        as u8;

    let strengths = bounded_list("strengths", raw.strengths, MAX_STRENGTHS).map_err(fail)?;
    let improvements =
        bounded_list("improvements", raw.improvements, MAX_IMPROVEMENTS).map_err(fail)?;
    let keywords = bounded_list("keywords", raw.keywords, KEYWORD_COUNT).map_err(fail)?;
    if keywords.len() < KEYWORD_COUNT {
        warn!(
            "Feedback has {} keywords, expected {}",
            keywords.len(),
            KEYWORD_COUNT
        );
    }

    Ok(Feedback {
        score,
        strengths,
        improvements,
        keywords,
        summary: raw.summary.trim().to_string(),
    })
}

fn bounded_list(field: &str, items: Vec<String>, max: usize) -> Result<Vec<String>, String> {
    let mut items: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        return Err(format!("{} is empty", field));
    }

    if items.len() > max {
        warn!("Feedback {} has {} entries, keeping {}", field, items.len(), max);
        items.truncate(max);
    }

    Ok(items)
}
