use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use urlalias::app::create_app;
use urlalias::config::Config;
use urlalias::service::Shortener;
use urlalias::{logging, storage};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    logging::init(config.env);
    info!(env = ?config.env, "starting urlalias");
    debug!("debug messages are enabled");

    // Initialize storage
    let storage = storage::connect(&config.database).await?;

    let shortener = Arc::new(Shortener::new(storage, config.alias));
    let app = create_app(shortener, &config.http_server);

    let addr = config.http_server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
