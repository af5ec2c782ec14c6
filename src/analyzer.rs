// src/analyzer.rs
//! Orchestrates one analysis: validate, build the prompt, make the single
//! remote call, parse the reply.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info};

use crate::error::AnalysisError;
use crate::model_client::ModelInvoker;
use crate::parser::parse_response;
use crate::prompt::build_prompt;
use crate::types::{AnalysisRequest, AnalysisResult};
use crate::utils::read_resume_text;

pub struct ResumeAnalyzer<M> {
    invoker: M,
    in_flight: AtomicBool,
}

/// Holds the in-flight slot for the duration of one invocation.
///
/// Releasing in `Drop` covers all three exit paths: success, failure, and a
/// caller that drops the future mid-await (the web framework drops handler
/// futures when the client disconnects). A manual release after the await
/// would miss the last one and leave the slot taken forever.
struct InFlightSlot<'a>(&'a AtomicBool);

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<M: ModelInvoker> ResumeAnalyzer<M> {
    pub fn new(invoker: M) -> Self {
        Self {
            invoker,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one analysis. Holds no state between calls beyond the in-flight
    /// flag; the result replaces any prior result for the caller.
    ///
    /// At most one analysis may be pending at a time: a request issued while
    /// another is awaiting the service is rejected immediately instead of
    /// racing it. Validation happens before the flag is taken, so an invalid
    /// request never consumes the slot and never reaches the invoker.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_prompt(request)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("Rejecting analysis request: another one is in flight");
            return Err(AnalysisError::busy());
        }
        let _slot = InFlightSlot(&self.in_flight);

        let outcome = self.invoker.generate(&prompt).await;

        match outcome {
            Ok(raw) => {
                let result = parse_response(&raw);
                info!(
                    "Analysis parsed: has_score={} keywords={} suggestions={}",
                    result.has_score,
                    result.missing_keywords.len(),
                    result.suggestions.len()
                );
                Ok(result)
            }
            Err(e) => {
                error!("Model invocation failed: {:#}", e);
                Err(AnalysisError::from_invocation(&e))
            }
        }
    }

    /// Read a resume file, then analyze it against a job description: two
    /// ordered suspending steps, the read completing before the call starts.
    pub async fn analyze_file(
        &self,
        resume_path: &Path,
        file_name: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let resume_text = read_resume_text(resume_path, file_name)
            .await
            .map_err(|e| {
                error!("Failed to read resume file: {:#}", e);
                AnalysisError::validation()
            })?;

        let request = AnalysisRequest::new(resume_text, job_description);
        self.analyze(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use anyhow::Result;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Test double that records calls and replies with a fixed script.
    struct ScriptedInvoker {
        calls: AtomicUsize,
        reply: Result<String, String>,
    }

    impl ScriptedInvoker {
        fn replying(raw: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Ok(raw.to_string()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Err(message.to_string()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ModelInvoker for ScriptedInvoker {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(raw) => Ok(raw.clone()),
                Err(message) => Err(anyhow::anyhow!("{}", message)),
            }
        }
    }

    /// Invoker that parks until released, to hold an analysis in flight.
    struct BlockingInvoker {
        release: Arc<Notify>,
    }

    impl ModelInvoker for BlockingInvoker {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.release.notified().await;
            Ok("Score: 10".to_string())
        }
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let analyzer = ResumeAnalyzer::new(ScriptedInvoker::replying(
            "Score: 72\nMissing Keywords: Python, SQL, Docker\nSuggestions:\n\u{2022} Add metrics\n\u{2022} Quantify impact\n",
        ));
        let request = AnalysisRequest::new("Ten years of Rust", "Senior Rust engineer");

        let result = analyzer.analyze(&request).await.unwrap();
        assert!(result.has_score);
        assert_eq!(result.score, 72);
        assert_eq!(result.missing_keywords, vec!["Python", "SQL", "Docker"]);
        assert_eq!(result.suggestions, vec!["Add metrics", "Quantify impact"]);
    }

    #[tokio::test]
    async fn test_validation_never_reaches_invoker() {
        let analyzer = ResumeAnalyzer::new(ScriptedInvoker::replying("Score: 50"));
        let request = AnalysisRequest::new("", "Senior Rust engineer");

        let err = analyzer.analyze(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(analyzer.invoker.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invocation_failure_is_classified() {
        let analyzer = ResumeAnalyzer::new(ScriptedInvoker::failing("Invalid API key provided"));
        let request = AnalysisRequest::new("resume", "job");

        let err = analyzer.analyze(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Auth);
        assert_eq!(analyzer.invoker.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_not_an_error() {
        let analyzer = ResumeAnalyzer::new(ScriptedInvoker::replying("no structure at all"));
        let request = AnalysisRequest::new("resume", "job");

        let result = analyzer.analyze(&request).await.unwrap();
        assert_eq!(result, AnalysisResult::empty());
    }

    #[tokio::test]
    async fn test_second_request_rejected_while_in_flight() {
        let release = Arc::new(Notify::new());
        let analyzer = Arc::new(ResumeAnalyzer::new(BlockingInvoker {
            release: release.clone(),
        }));
        let request = AnalysisRequest::new("resume", "job");

        let first = {
            let analyzer = analyzer.clone();
            let request = request.clone();
            tokio::spawn(async move { analyzer.analyze(&request).await })
        };

        // Wait for the first call to take the in-flight slot.
        while !analyzer.in_flight.load(Ordering::Acquire) {
            tokio::task::yield_now().await;
        }

        let err = analyzer.analyze(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Generic);
        assert!(err.message.contains("already in progress"));

        release.notify_one();
        let result = first.await.unwrap().unwrap();
        assert_eq!(result.score, 10);

        // Slot released; a new request goes through again.
        release.notify_one();
        assert!(analyzer.analyze(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_dropped_analysis_releases_in_flight_slot() {
        let release = Arc::new(Notify::new());
        let analyzer = Arc::new(ResumeAnalyzer::new(BlockingInvoker {
            release: release.clone(),
        }));
        let request = AnalysisRequest::new("resume", "job");

        let first = {
            let analyzer = analyzer.clone();
            let request = request.clone();
            tokio::spawn(async move { analyzer.analyze(&request).await })
        };

        while !analyzer.in_flight.load(Ordering::Acquire) {
            tokio::task::yield_now().await;
        }

        // Client went away mid-request: the handler future is dropped while
        // the invocation is still pending.
        first.abort();
        assert!(first.await.unwrap_err().is_cancelled());

        // The slot must not stay taken; the next request goes through.
        release.notify_one();
        let result = analyzer.analyze(&request).await.unwrap();
        assert_eq!(result.score, 10);
    }
}
