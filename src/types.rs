// src/types.rs
use serde::{Deserialize, Serialize};

/// One resume/job-description pair submitted for analysis.
///
/// Both fields must be non-empty after trimming before a prompt is built;
/// validation happens in [`crate::prompt::build_prompt`].
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(resume_text: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_description: job_description.into(),
        }
    }
}

/// Structured outcome of parsing a model reply.
///
/// `score` is only meaningful when `has_score` is true; a reply without a
/// parsable `Score:` line keeps `score` at 0 but reports `has_score: false`
/// so the presentation layer can tell "no score found" from a genuine zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u32,
    pub has_score: bool,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Result of a reply from which nothing could be recovered.
    pub fn empty() -> Self {
        Self {
            score: 0,
            has_score: false,
            missing_keywords: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}
