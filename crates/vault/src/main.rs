//! `identity-vault` — service entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP spans).
//! 3. Create the [`LedgerStore`], importing the seed file if one is configured.
//! 4. Build the Axum router and start the HTTP server.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use identity_vault::config::Config;
use identity_vault::ledger::{Ledger, LedgerStore};
use identity_vault::server::{self, state::AppState};
use identity_vault::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        page_size = cfg.page_size,
        "identity-vault starting"
    );

    // -----------------------------------------------------------------------
    // 3. Ledger
    // -----------------------------------------------------------------------
    let mut ledger = Ledger::new(cfg.page_size);
    if let Some(path) = &cfg.seed_path {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read seed file {path}"))?;
        ledger
            .import_replace(&text)
            .with_context(|| format!("seed file {path} is not a valid ledger export"))?;
        info!(records = ledger.len(), "ledger seeded from file");
    }
    let store = LedgerStore::from_ledger(ledger);

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(store, Duration::from_secs(cfg.request_timeout_secs));
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
