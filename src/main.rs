use anyhow::{Context, Result};
use clap::Parser;
use mock_interview::{create_router, AppState, Config, LlmRelay, OpenAiClient, VideoStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// AI mock-interview relay server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (extension optional)
    #[arg(long, default_value = "config/mock-interview")]
    config: String,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::load(&cli.config)?;
    if let Some(port) = cli.port {
        cfg.service.http.port = port;
    }
    if let Some(bind) = cli.bind {
        cfg.service.http.bind = bind;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Upstream: {} (model {})", cfg.upstream.api_url, cfg.upstream.model);
    match cfg.upstream.api_key.as_deref() {
        Some(key) if cfg.api_key_set() => {
            info!("API key: set ({}...)", key.chars().take(10).collect::<String>())
        }
        _ => warn!("API key: NOT set - /api/chat and /api/feedback will fail"),
    }

    let upstream = OpenAiClient::new(&cfg.upstream).context("Failed to create upstream client")?;
    let relay = LlmRelay::new(Arc::new(upstream));
    let videos = VideoStore::new(&cfg.uploads.dir, &cfg.uploads.public_base_url).await?;
    info!("Recordings stored in {}", cfg.uploads.dir.display());

    let app = create_router(AppState::new(relay, videos), cfg.uploads.max_bytes);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}
