// src/web/types.rs
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ErrorKind};

#[derive(FromForm)]
pub struct AnalyzeUploadForm<'f> {
    pub resume: TempFile<'f>,
    pub job_description: String,
    pub conversation_id: Option<String>,
}

// Request envelope with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

// Helper trait for extracting conversation_id
pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Error,
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }

    /// Map an [`AnalysisError`] to the wire envelope: fixed message, stable
    /// code, recovery suggestions per kind.
    pub fn from_analysis(err: &AnalysisError, conversation_id: Option<String>) -> Self {
        let suggestions = match err.kind {
            ErrorKind::Configuration => vec![
                "Set GEMINI_API_KEY in the server environment".to_string(),
                "Restart the server after configuring the key".to_string(),
            ],
            ErrorKind::Validation => vec![
                "Upload a resume file".to_string(),
                "Paste the job description".to_string(),
            ],
            ErrorKind::Auth => vec!["Verify the configured Gemini API key".to_string()],
            ErrorKind::ModelUnavailable => vec!["Try again later".to_string()],
            ErrorKind::Generic => vec!["Try again in a few moments".to_string()],
        };

        Self::new(
            err.message.clone(),
            err.kind.error_code().to_string(),
            suggestions,
            conversation_id,
        )
    }
}
