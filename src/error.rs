// src/error.rs
//! Failure taxonomy for the analysis pipeline.
//!
//! The completion service exposes no structured error channel; all we get
//! from a failed invocation is a human-readable message. Classification is
//! therefore a substring heuristic over that text - crude, but deterministic
//! and documented here precisely because nothing stronger is available.

use serde::Serialize;
use std::fmt;

/// Closed set of user-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// API credential missing at startup; fatal for the session.
    Configuration,
    /// Resume or job description missing/empty; no remote call was made.
    Validation,
    /// The service rejected our credential.
    Auth,
    /// The requested model could not be reached.
    ModelUnavailable,
    /// Anything else that went wrong during the remote call.
    Generic,
}

impl ErrorKind {
    /// Fixed message shown to the user for this kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => {
                "Gemini API key is not configured. Set GEMINI_API_KEY before starting the server."
            }
            ErrorKind::Validation => "Please upload a resume and provide a job description",
            ErrorKind::Auth => "Invalid API key. Please check your Gemini API key configuration.",
            ErrorKind::ModelUnavailable => "Error accessing the AI model. Please try again later.",
            ErrorKind::Generic => "Error analyzing resume. Please try again.",
        }
    }

    /// Stable code for the web error envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "CONFIGURATION_ERROR",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Auth => "AUTH_ERROR",
            ErrorKind::ModelUnavailable => "MODEL_UNAVAILABLE",
            ErrorKind::Generic => "ANALYSIS_FAILED",
        }
    }
}

/// Map a failed invocation's message text to an [`ErrorKind`].
///
/// Order matters: the credential check runs before the model check, because
/// messages like "API key not valid for this model" must classify as `Auth`.
pub fn classify_failure(message: &str) -> ErrorKind {
    if message.contains("API key") {
        ErrorKind::Auth
    } else if message.contains("model") {
        ErrorKind::ModelUnavailable
    } else {
        ErrorKind::Generic
    }
}

/// Error surfaced to the presentation layer: a kind plus its message.
#[derive(Debug, Clone)]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AnalysisError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.user_message().to_string(),
        }
    }

    pub fn validation() -> Self {
        Self::new(ErrorKind::Validation)
    }

    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Rejection of a request issued while another analysis is pending.
    /// The taxonomy has no dedicated kind for this, so it rides on
    /// `Generic` with its own message.
    pub fn busy() -> Self {
        Self {
            kind: ErrorKind::Generic,
            message: "An analysis is already in progress. Please wait for it to finish."
                .to_string(),
        }
    }

    /// Classify a failed remote invocation. The full anyhow context chain is
    /// rendered so substrings added by `.context(...)` also participate.
    pub fn from_invocation(err: &anyhow::Error) -> Self {
        Self::new(classify_failure(&format!("{:#}", err)))
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth() {
        assert_eq!(classify_failure("Invalid API key provided"), ErrorKind::Auth);
    }

    #[test]
    fn test_classify_model_unavailable() {
        assert_eq!(
            classify_failure("model not found"),
            ErrorKind::ModelUnavailable
        );
    }

    #[test]
    fn test_classify_generic() {
        assert_eq!(classify_failure("network timeout"), ErrorKind::Generic);
    }

    #[test]
    fn test_auth_wins_over_model() {
        // Both substrings present: the credential check runs first.
        assert_eq!(
            classify_failure("API key not valid for this model"),
            ErrorKind::Auth
        );
    }

    #[test]
    fn test_each_kind_has_distinct_message() {
        let kinds = [
            ErrorKind::Configuration,
            ErrorKind::Validation,
            ErrorKind::Auth,
            ErrorKind::ModelUnavailable,
            ErrorKind::Generic,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.user_message(), b.user_message());
            }
        }
    }

    #[test]
    fn test_from_invocation_reads_context_chain() {
        let err = anyhow::anyhow!("HTTP 400 error: API key not valid")
            .context("Failed to call completion service");
        assert_eq!(AnalysisError::from_invocation(&err).kind, ErrorKind::Auth);
    }
}
