// src/prompt.rs
//! Builds the outbound prompt for the completion service.

use crate::error::AnalysisError;
use crate::types::AnalysisRequest;

/// Build the analysis prompt for a resume/job-description pair.
///
/// Rejects the request with a `Validation` error when either field is empty
/// after trimming - no remote call is made in that case. The prompt asks the
/// service for three ordered sections (`Score:`, `Missing Keywords:`,
/// `Suggestions:`) which [`crate::parser::parse_response`] later extracts.
pub fn build_prompt(request: &AnalysisRequest) -> Result<String, AnalysisError> {
    let resume = request.resume_text.trim();
    let job_description = request.job_description.trim();

    if resume.is_empty() || job_description.is_empty() {
        return Err(AnalysisError::validation());
    }

    Ok(format!(
        "Analyze this resume against the job description and provide the following in a structured format:\n\
         \n\
         1. First line should be \"Score: XX\" where XX is a number between 0-100\n\
         2. Then \"Missing Keywords:\" followed by a comma-separated list of missing keywords\n\
         3. Finally \"Suggestions:\" followed by 6-7 bullet points for improvement suggestions\n\
         \n\
         Keep suggestions concise (1-2 lines each) and focus on actionable improvements.\n\
         Do not use quotes, numbers, or special characters in the suggestions.\n\
         Each suggestion should start with a bullet point (\u{2022}).\n\
         \n\
         Resume:\n\
         {resume}\n\
         \n\
         Job Description:\n\
         {job_description}\n"
    ))
}
