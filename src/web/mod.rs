// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

use crate::analyzer::ResumeAnalyzer;
use crate::model_client::GeminiClient;
use crate::types::{AnalysisRequest, AnalysisResult};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/analyze", data = "<request>")]
pub async fn analyze(
    request: Json<StandardRequest<AnalysisRequest>>,
    analyzer: &State<ResumeAnalyzer<GeminiClient>>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    handlers::analyze_handler(request, analyzer).await
}

#[post("/analyze-upload", data = "<upload>")]
pub async fn analyze_upload(
    upload: Form<AnalyzeUploadForm<'_>>,
    analyzer: &State<ResumeAnalyzer<GeminiClient>>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    handlers::analyze_upload_handler(upload, analyzer).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

// Main server start function
pub async fn start_web_server(analyzer: ResumeAnalyzer<GeminiClient>, port: u16) -> Result<()> {
    info!("Starting analysis server on port {}", port);

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(analyzer)
        .mount(
            "/",
            routes![analyze, analyze_upload, health, all_options],
        )
        .register("/", catchers![bad_request, internal_error])
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed to launch: {}", e))?;

    Ok(())
}
