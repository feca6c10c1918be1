use anyhow::{Context, Result};
use clap::Parser;
use relay_core::RelayConfig;
use relay_server::{
    AppState,
    cli::{Cli, Commands, sign_file},
    routes::app_router,
};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_server=debug,relay_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.command.unwrap_or_default() {
        Commands::Run { host, port } => run(host, port).await,
        Commands::Sign { secret, file } => sign(&secret, &file),
    }
}

async fn run(host: Option<String>, port: Option<u16>) -> Result<()> {
    init_tracing();

    let mut config = RelayConfig::from_env().context("Failed to load configuration")?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    if config.webhook_secret.is_none() {
        tracing::warn!("WEBHOOK_SECRET is not set; every webhook delivery will be rejected");
    }

    let addr = config.bind_addr();
    tracing::info!(
        "Review mode: {}, model: {}",
        config.review_mode,
        config.llm_model
    );

    let state = AppState::from_config(config).context("Failed to build HTTP clients")?;
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server is listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn sign(secret: &str, file: &Path) -> Result<()> {
    let signature =
        sign_file(secret, file).with_context(|| format!("Failed to read {}", file.display()))?;
    println!("{}", signature);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
