use anyhow::Context;
use bastion::logging::{init_tracing, install_panic_hook};
use bastion::router::init_router;
use bastion::state::AppState;
use bastion_config::AppConfig;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

#[derive(Parser)]
#[command(name = "bastion", about = "Bastion API server", long_about = None)]
struct Args {
    /// Port to listen on, overriding `PORT`
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _log_guards = init_tracing(&config.logging)?;
    install_panic_hook();

    let state = AppState::from_config(&config).await?;
    let app = init_router(state, &config.server.allowed_origins);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(
        address = %address,
        environment = %config.environment,
        "Server running, OpenAPI document at /api-docs/openapi.json"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
