// src/web/handlers.rs
//! Handler bodies for the analysis API.

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::analyzer::ResumeAnalyzer;
use crate::error::AnalysisError;
use crate::model_client::GeminiClient;
use crate::types::{AnalysisRequest, AnalysisResult};
use crate::web::types::{
    AnalyzeUploadForm, DataResponse, StandardErrorResponse, StandardRequest, WithConversationId,
};

pub async fn analyze_handler(
    request: Json<StandardRequest<AnalysisRequest>>,
    analyzer: &State<ResumeAnalyzer<GeminiClient>>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    info!("Received analysis request");

    match analyzer.analyze(&request.data).await {
        Ok(result) => Ok(Json(DataResponse::success(
            "Resume analysis completed".to_string(),
            result,
            conversation_id,
        ))),
        Err(e) => {
            error!("Analysis failed ({}): {}", e.kind.error_code(), e);
            Err(Json(StandardErrorResponse::from_analysis(
                &e,
                conversation_id,
            )))
        }
    }
}

pub async fn analyze_upload_handler(
    upload: Form<AnalyzeUploadForm<'_>>,
    analyzer: &State<ResumeAnalyzer<GeminiClient>>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    let conversation_id = upload.conversation_id.clone();

    let file_name = upload
        .resume
        .raw_name()
        .and_then(|n| n.as_str())
        .unwrap_or("resume.txt")
        .to_string();

    info!("Received analysis upload: {}", file_name);

    let Some(path) = upload.resume.path() else {
        // Rocket buffered the upload in memory; nothing was written to disk.
        let e = AnalysisError::validation();
        return Err(Json(StandardErrorResponse::from_analysis(
            &e,
            conversation_id,
        )));
    };

    match analyzer
        .analyze_file(path, &file_name, &upload.job_description)
        .await
    {
        Ok(result) => Ok(Json(DataResponse::success(
            "Resume analysis completed".to_string(),
            result,
            conversation_id,
        ))),
        Err(e) => {
            error!("Analysis failed ({}): {}", e.kind.error_code(), e);
            Err(Json(StandardErrorResponse::from_analysis(
                &e,
                conversation_id,
            )))
        }
    }
}

pub async fn health_handler() -> Json<&'static str> {
    Json("OK")
}
