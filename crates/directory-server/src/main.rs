//! # User Directory Server
//!
//! Entry point: loads configuration, installs logging and serves the
//! REST API until Ctrl+C or SIGTERM.

use anyhow::Context;
use directory_config::ConfigLoader;
use directory_core::telemetry::init_telemetry;
use directory_server::{
    startup::{print_banner, print_startup_info},
    Application,
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be installed yet.
        eprintln!("Application error: {:#}", e);
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ConfigLoader::from_default_location()
        .context("Failed to load configuration")?
        .into_config();

    init_telemetry(&config.telemetry()).context("Failed to initialize logging")?;

    print_banner();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);
    print_startup_info(&config);

    let app = Application::build(&config)
        .await
        .context("Failed to assemble application")?;

    app.run(shutdown_signal()).await.context("Server stopped with an error")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
