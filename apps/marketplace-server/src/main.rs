use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use marketplace_server::{AppConfig, build_app, logging};
use tokio::net::TcpListener;

/// AI tools marketplace server with role-based access gate.
#[derive(Debug, Parser)]
#[command(name = "marketplace-server", version, about)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "MARKETPLACE_CONFIG")]
    config: Option<PathBuf>,

    /// Override `server.bind_addr`
    #[arg(long)]
    bind: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.logging)?;

    let app = build_app(&config)?;

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.server.bind_addr))?;
    tracing::info!(bind_addr = %config.server.bind_addr, "marketplace-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("marketplace-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
