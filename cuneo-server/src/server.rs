use anyhow::{Context, Result};
use cuneo_core::Config;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{AppState, create_app};

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
pub async fn run(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_app(state);

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {address}"))?;

    if !config.has_openai_api_key() {
        warn!("OPENAI_API_KEY is not set; /chat requests will fail upstream");
    }

    info!(
        address = %listener.local_addr().context("Failed to read bound address")?,
        environment = %config.environment,
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
