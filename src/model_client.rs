// src/model_client.rs
//! HTTP client for the Gemini `generateContent` endpoint.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::error::AnalysisError;

const GENERATE_CONTENT_PATH: &str = "/v1beta/models";

/// The single remote call the analysis pipeline depends on.
///
/// Implementations send a prompt to a text-completion service and return the
/// raw reply text. The caller treats this as an opaque remote call: no
/// retries, no header inspection, and on failure only the rendered error
/// message is available for classification.
pub trait ModelInvoker {
    fn generate(&self, prompt: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Error envelope the service returns on non-success statuses. Only the
/// message text matters; it feeds the substring classifier.
#[derive(Deserialize)]
struct ServiceError {
    error: ServiceErrorBody,
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    message: String,
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new client. The API key is injected here, once, rather than
    /// looked up from the environment inside the call path; an empty key is
    /// rejected immediately so no request is ever attempted without one.
    pub fn new(config: &ModelConfig, api_key: String) -> Result<Self, AnalysisError> {
        if api_key.trim().is_empty() {
            return Err(AnalysisError::configuration());
        }

        // The suspension point has otherwise unbounded duration; the timeout
        // comes from configuration.
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|_| AnalysisError::configuration())?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
        })
    }
}

impl ModelInvoker for GeminiClient {
    /// Send one prompt wrapped as a single message part; return the reply
    /// text. A streamed response is not used - the reply arrives fully
    /// buffered before parsing.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}{}/{}:generateContent?key={}",
            self.base_url, GENERATE_CONTENT_PATH, self.model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        info!("Calling completion service model: {}", self.model);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("Failed to call completion service")?;

        let status = response.status();
        if status.is_success() {
            let reply: GenerateContentResponse = response
                .json()
                .await
                .context("Failed to parse completion service response")?;

            let text = reply
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content)
                .map(|c| {
                    c.parts
                        .into_iter()
                        .map(|p| p.text)
                        .collect::<Vec<_>>()
                        .join("")
                })
                .unwrap_or_default();

            if text.is_empty() {
                warn!("Completion service returned no candidate text");
            }

            Ok(text)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Prefer the structured message when the body is the service's
            // JSON error envelope; fall back to the raw body.
            let message = match serde_json::from_str::<ServiceError>(&error_text) {
                Ok(envelope) => envelope.error.message,
                Err(_) => error_text,
            };

            anyhow::bail!("Completion service error {}: {}", status, message)
        }
    }
}
