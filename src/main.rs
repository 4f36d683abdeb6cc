use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use huddle_meetings::{create_router, AppState, Config, LoopbackBackend, MemoryStore};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "huddle-meetings", about = "Live meeting recording service")]
struct Args {
    /// Config file base path (extension optional)
    #[arg(long, default_value = "config/huddle-meetings")]
    config: String,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    // Until a capture service is attached this serves the loopback backend,
    // which answers the device list and finalizes sessions over the same
    // protocol a real recorder uses.
    let backend = Arc::new(LoopbackBackend::new());
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(backend, store, cfg.recording.clone());

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind((cfg.service.http.bind.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", cfg.service.http.bind, port))?;

    info!("HTTP server listening on {}:{}", cfg.service.http.bind, port);

    axum::serve(listener, app).await?;

    Ok(())
}
