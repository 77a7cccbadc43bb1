//! voice-service entry point: env config, tracing, then serve.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use llm_client::{EnvLlmConfig, OpenAiChat, WhisperTranscriber};
use memory::{InMemoryContextStore, TranscriptHistory};
use voice_service::{router, AppState};

#[derive(Parser)]
#[command(name = "voice-service", about = "Context-aware voice answer relay")]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8001")]
    bind: String,

    /// Log file path (teed with stdout).
    #[arg(long, default_value = "voice-service.log")]
    log_file: String,

    /// Number of transcript turns kept in the rolling history.
    #[arg(long, default_value_t = memory::DEFAULT_TRANSCRIPT_CAPACITY)]
    history: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    docunder_core::init_tracing(&cli.log_file)?;

    let config = EnvLlmConfig::from_env()?;
    let state = AppState::new(
        Arc::new(InMemoryContextStore::new()),
        TranscriptHistory::new(cli.history),
        Arc::new(WhisperTranscriber::from_config(&config)),
        Arc::new(OpenAiChat::from_config(&config)),
    );
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    tracing::info!(addr = %cli.bind, "voice-service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
