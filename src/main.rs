//! Local LLM web chat backed by Ollama
//!
//! (c) Softlandia 2025

use local_llm_chat::api;
use local_llm_chat::core::services::MyChatService;
use local_llm_chat::infrastructure::ollama::OllamaClient;
use local_llm_chat::infrastructure::settings::Settings;
use local_llm_chat::infrastructure::transcripts::InMemoryTranscriptStore;

use anyhow::anyhow;
use di::{Injectable, ServiceCollection};
use di_axum::RouterServiceProviderExtensions;
use log::info;
use tokio::runtime::{Builder, Runtime};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(web_server_task())
}

async fn web_server_task() -> anyhow::Result<()> {
    let provider = ServiceCollection::new()
        .add(Settings::singleton())
        .add(InMemoryTranscriptStore::singleton())
        .add(OllamaClient::singleton())
        .add(MyChatService::scoped())
        .build_provider()
        .map_err(|e| anyhow!("invalid service registrations: {e:?}"))?;

    let settings = provider.get_required::<Settings>();
    info!(
        "using model {} served by {}",
        settings.model, settings.ollama_url
    );

    let app = api::router(&settings)
        .layer(api::cors_layer(&settings))
        .with_provider(provider);

    let listener = tokio::net::TcpListener::bind(settings.bind_address).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
    }
}
