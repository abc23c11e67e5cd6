//! Neuropulse - brainwave mood intelligence pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Run with ./neuropulse.toml (or built-in defaults)
//! cargo run --release
//!
//! # Run with an explicit config file
//! cargo run --release -- --config /etc/neuropulse.toml
//! ```
//!
//! # Environment Variables
//!
//! - `NEUROPULSE_CONFIG`: Path to the TOML config file
//! - `NEUROPULSE_STORE_TOKEN`: Bearer token for the file store
//! - `NEUROPULSE_ANALYSIS_TOKEN`: Bearer token for the analysis service
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::info;

use neuropulse::config::{bearer_token_from_env, defaults, Config};
use neuropulse::pipeline::{run_cycle, spawn_live_mirror, LiveState};
use neuropulse::playback::PlaybackScheduler;
use neuropulse::{HttpAnalysisClient, HttpPayloadFetch};

#[derive(Parser, Debug)]
#[command(name = "neuropulse", about = "Brainwave mood intelligence pipeline")]
struct Args {
    /// Path to the TOML config file (overrides the default search order)
    #[arg(long, env = "NEUROPULSE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match args.config {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };
    config.validate().context("Invalid configuration")?;

    info!("Neuropulse starting");
    info!("   Sources:         {}", config.sources.ids.len());
    info!("   Window interval: {}s", config.timing.window_interval_secs);
    info!("   Playback tick:   {}ms", config.timing.playback_tick_ms);

    let timeout = Duration::from_secs(config.http.timeout_secs);
    let fetcher = HttpPayloadFetch::new(
        timeout,
        bearer_token_from_env(defaults::STORE_TOKEN_ENV),
    )
    .context("Failed to build file-store client")?;
    let backend = HttpAnalysisClient::new(
        &config.analysis.endpoint,
        &config.analysis.model,
        timeout,
        bearer_token_from_env(defaults::ANALYSIS_TOKEN_ENV),
    )
    .context("Failed to build analysis client")?;

    let state = Arc::new(RwLock::new(LiveState::default()));
    let mut scheduler =
        PlaybackScheduler::new(Duration::from_millis(config.timing.playback_tick_ms));

    let shutdown = CancellationToken::new();
    let mirror = spawn_live_mirror(&scheduler, Arc::clone(&state), shutdown.clone());

    let sources = config.source_descriptors();
    run_cycle(
        &fetcher,
        &backend,
        &mut scheduler,
        &state,
        &sources,
        config.timing.window_interval_secs,
    )
    .await;

    // Playback keeps publishing until shutdown.
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    scheduler.stop();
    shutdown.cancel();
    let _ = mirror.await;

    info!("Neuropulse stopped");
    Ok(())
}
