//! extract-service entry point: env config, tracing, then serve.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use extract_service::{router, AppState};
use gemini_client::{EnvGeminiConfig, GeminiClient};
use memory::InMemoryResultStore;

#[derive(Parser)]
#[command(name = "extract-service", about = "PDF section extraction relay")]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: String,

    /// Log file path (teed with stdout).
    #[arg(long, default_value = "extract-service.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    docunder_core::init_tracing(&cli.log_file)?;

    let config = EnvGeminiConfig::from_env()?;
    let document_model = Arc::new(GeminiClient::from_config(&config));
    let results = Arc::new(InMemoryResultStore::default());
    let app = router(AppState::new(document_model, results));

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    tracing::info!(addr = %cli.bind, "extract-service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
