mod config;
mod editor;
mod errors;
mod export;
mod models;
mod navigator;
mod preview;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::HtmlPageExporter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    let exporter = Arc::new(HtmlPageExporter::new(config.export_page_width_mm));
    info!(
        "Export adapter: standalone HTML, {}mm page width",
        exporter.page_width_mm
    );
    info!(
        "Navigator: {}px header clearance, {}ms scroll",
        config.header_clearance_px, config.scroll_duration_ms
    );

    let state = AppState::new(&config, exporter);

    // Expire sessions whose tab went away without a DELETE
    state
        .sessions
        .spawn_sweeper(config.session_ttl(), config.session_sweep_interval());
    info!(
        "Session sweeper: {}s idle TTL, checked every {}s",
        config.session_ttl_secs, config.session_sweep_secs
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
