use anyhow::Result;
use resume_match::error::ErrorKind;
use resume_match::{start_web_server, GeminiClient, ModelConfig, ResumeAnalyzer};
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open("/tmp/resume_match.log")
        .expect("Failed to open log file");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resume_match=info,rocket::server=off")),
        )
        .init();

    let port = std::env::var("ROCKET_PORT")
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT environment variable not set"))?
        .parse::<u16>()
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;

    // The credential is resolved exactly once, here, and injected into the
    // client; its absence fails startup before any request work.
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("{}", ErrorKind::Configuration.user_message()))?;

    let config = ModelConfig::load()?;

    info!("Starting Resume Match API Server");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Model: {}", config.model);
    info!("Server: http://0.0.0.0:{}", port);

    let client =
        GeminiClient::new(&config, api_key).map_err(|e| anyhow::anyhow!("{}", e.message))?;
    let analyzer = ResumeAnalyzer::new(client);

    start_web_server(analyzer, port).await
}
