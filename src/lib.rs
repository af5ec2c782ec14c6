// src/lib.rs
//! Resume-match analysis service.
//!
//! Compares a resume against a job description by prompting a generative
//! text-completion service, then extracts a bounded, structured result
//! (match score, missing keywords, capped suggestions) from the free-text
//! reply. The reply carries no guaranteed schema, so the parser is a
//! tolerant best-effort extractor that degrades to partial results instead
//! of failing.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod model_client;
pub mod parser;
pub mod prompt;
pub mod types;
pub mod utils;
pub mod web;

pub use analyzer::ResumeAnalyzer;
pub use config::ModelConfig;
pub use error::{classify_failure, AnalysisError, ErrorKind};
pub use model_client::{GeminiClient, ModelInvoker};
pub use parser::parse_response;
pub use prompt::build_prompt;
pub use types::{AnalysisRequest, AnalysisResult};
pub use web::start_web_server;
