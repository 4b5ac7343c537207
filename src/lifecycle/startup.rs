//! Startup orchestration.
//!
//! Fail fast: any startup error is fatal. The listener binds last, so
//! traffic only arrives once everything else is ready.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_signal;
use crate::observability::metrics;
use crate::security::SubnetError;
use crate::template::TemplateRenderer;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no such file or directory: {0}")]
    MissingDocument(String),

    #[error("invalid access control list: {0}")]
    AccessList(#[from] SubnetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check the environment, bind, and serve until a signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    match &config.replication.master {
        None => {
            if !config.document.path.exists() {
                return Err(StartupError::MissingDocument(
                    config.document.path.display().to_string(),
                ));
            }
            tracing::info!(
                helpers = %TemplateRenderer::default().helpers().join(", "),
                "Defined template helpers"
            );
        }
        Some(master) => tracing::info!(master = %master, "Follower mode, redirecting to master"),
    }

    tracing::info!(
        document = %config.document.path.display(),
        port = config.listener.port,
        access_control = config.access.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.bind_address();
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        signal_shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
