//! Interviewer prompt table
//!
//! Maps an (interview type, job role) pair to the system instruction that
//! drives the interviewer persona, and builds the evaluation instruction
//! used when a session ends. Lookups never fail: an unknown type falls back
//! to `personality`, an unknown role to that type's `general` entry.

mod feedback;
mod table;

pub use feedback::{feedback_instruction, feedback_request};

use serde::{Deserialize, Serialize};

/// Interview category chosen at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    #[default]
    Personality,
    Technical,
    English,
    Executive,
}

impl InterviewType {
    pub const ALL: [InterviewType; 4] = [
        InterviewType::Personality,
        InterviewType::Technical,
        InterviewType::English,
        InterviewType::Executive,
    ];

    /// Parse a free-form value, falling back to `Personality`
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "personality" => InterviewType::Personality,
            "technical" => InterviewType::Technical,
            "english" => InterviewType::English,
            "executive" => InterviewType::Executive,
            _ => InterviewType::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Personality => "personality",
            InterviewType::Technical => "technical",
            InterviewType::English => "english",
            InterviewType::Executive => "executive",
        }
    }

    /// Display label used inside evaluation instructions
    pub fn label(&self) -> &'static str {
        match self {
            InterviewType::Personality => "인성면접",
            InterviewType::Technical => "기술면접",
            InterviewType::English => "영어면접",
            InterviewType::Executive => "임원면접",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, InterviewType::English)
    }
}

/// Job role the interview targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobRole {
    #[default]
    General,
    Developer,
    Designer,
    Marketer,
    Planner,
    Sales,
}

impl JobRole {
    pub const ALL: [JobRole; 6] = [
        JobRole::General,
        JobRole::Developer,
        JobRole::Designer,
        JobRole::Marketer,
        JobRole::Planner,
        JobRole::Sales,
    ];

    /// Parse a free-form value, falling back to `General`
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "general" => JobRole::General,
            "developer" => JobRole::Developer,
            "designer" => JobRole::Designer,
            "marketer" => JobRole::Marketer,
            "planner" => JobRole::Planner,
            "sales" => JobRole::Sales,
            _ => JobRole::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobRole::General => "general",
            JobRole::Developer => "developer",
            JobRole::Designer => "designer",
            JobRole::Marketer => "marketer",
            JobRole::Planner => "planner",
            JobRole::Sales => "sales",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobRole::General => "일반",
            JobRole::Developer => "개발자",
            JobRole::Designer => "디자이너",
            JobRole::Marketer => "마케터",
            JobRole::Planner => "기획자",
            JobRole::Sales => "영업",
        }
    }
}

/// Resolved (type, role) pair carried with every relay call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterviewSelection {
    pub interview_type: InterviewType,
    pub job_role: JobRole,
}

impl InterviewSelection {
    pub fn new(interview_type: InterviewType, job_role: JobRole) -> Self {
        Self {
            interview_type,
            job_role,
        }
    }

    /// Build from optional wire values (`interviewType`, `jobPosition`)
    pub fn from_wire(interview_type: Option<&str>, job_role: Option<&str>) -> Self {
        Self {
            interview_type: interview_type
                .map(InterviewType::parse_or_default)
                .unwrap_or_default(),
            job_role: job_role.map(JobRole::parse_or_default).unwrap_or_default(),
        }
    }

    pub fn system_instruction(&self) -> &'static str {
        table::instruction(self.interview_type, self.job_role)
    }
}

/// Resolve the interviewer instruction for free-form type and role strings
pub fn resolve(interview_type: &str, job_role: &str) -> &'static str {
    InterviewSelection::from_wire(Some(interview_type), Some(job_role)).system_instruction()
}
