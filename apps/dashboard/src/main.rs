mod config;
mod errors;
mod models;
mod nav;
mod routes;
mod shell;
mod source;
mod state;
mod storage;
mod views;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::shell::{Shell, ShellOptions};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dashboard v{}", env!("CARGO_PKG_VERSION"));

    let source = source::from_root(&config.assets_root)?;
    info!("Assets served from {}", config.assets_root);

    let store = storage::open(&config.storage_url)?;
    info!("Persisted state stored in {}", config.storage_url);

    // Configuration is loaded lazily by the first protected view.
    let shell = Shell::new(
        source,
        store,
        ShellOptions {
            resume_base: config.resume_base.clone(),
            full_routes: config.full_routes,
        },
    );
    info!(
        "Route set: {}",
        if config.full_routes { "full" } else { "minimal" }
    );

    let state = AppState {
        shell: Arc::new(shell),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
