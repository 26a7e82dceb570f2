mod cli;
mod config;
mod errors;
mod generation;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod worksheet;

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{run_generate, Cli, Command};
use crate::config::Config;
use crate::layout::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Command::Generate(args) => {
            let written = run_generate(&args, &config)?;
            info!("Generated {} worksheet file(s)", written.len());
            Ok(())
        }
        Command::Serve { port } => serve(config, port).await,
    }
}

async fn serve(config: Config, port: Option<u16>) -> Result<()> {
    info!("Starting worksheet API v{}", env!("CARGO_PKG_VERSION"));

    let page_config = default_page_config();
    info!(
        "Page config: {}x{}pt, {} columns",
        page_config.page_width_pt, page_config.page_height_pt, page_config.column_count
    );

    let port = port.unwrap_or(config.port);
    let state = AppState {
        config,
        page_config,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
