//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for master or follower mode
//! - Wire up middleware (request id, tracing, request log, access control, body limit)
//! - Bind server to listener
//! - Start the replication poller in follower mode
//! - Drain in-flight requests on shutdown, bounded by a grace period

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::coordinator::RequestCoordinator;
use crate::http::handlers::config_handler;
use crate::http::middleware::{access_control_middleware, request_log_middleware, AccessControlState};
use crate::http::request::RequestUuid;
use crate::notification::NotificationRegistry;
use crate::replication::{redirect_handler, MasterPoller};
use crate::security::{SubnetError, SubnetList};
use crate::tree::DocumentSource;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: RequestCoordinator,
}

/// HTTP server for the configuration service.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    registry: Arc<NotificationRegistry>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self, SubnetError> {
        let registry = Arc::new(NotificationRegistry::new());
        let allowed = Arc::new(SubnetList::parse(&config.access.allowed_subnets)?);
        let access = AccessControlState {
            allowed,
            enabled: config.access.enabled,
        };

        let router = match &config.replication.master {
            Some(master) => Self::follower_router(master),
            None => {
                let coordinator = RequestCoordinator::new(
                    DocumentSource::new(&config.document.path),
                    registry.clone(),
                );
                Self::master_router(&config, AppState { coordinator })
            }
        };

        let router = Self::with_middleware(router, access);
        Ok(Self {
            router,
            config,
            registry,
        })
    }

    fn master_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(config_handler))
            .route("/", any(config_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_template_bytes))
    }

    fn follower_router(master: &str) -> Router {
        let master: Arc<str> = Arc::from(master);
        Router::new()
            .route("/{*path}", any(redirect_handler))
            .route("/", any(redirect_handler))
            .with_state(master)
    }

    /// Layers run outermost-last: request id, trace, log line, access control.
    fn with_middleware(router: Router, access: AccessControlState) -> Router {
        router
            .layer(middleware::from_fn_with_state(access, access_control_middleware))
            .layer(middleware::from_fn(request_log_middleware))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    ///
    /// Parked long-poll requests never finish on their own, so after the
    /// shutdown signal the server waits at most the configured grace period.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = if self.config.is_follower() { "follower" } else { "master" },
            "HTTP server starting"
        );

        if let Some(master) = &self.config.replication.master {
            let poller = MasterPoller::new(
                master.clone(),
                self.config.document.path.clone(),
                Duration::from_secs(self.config.replication.poll_interval_secs),
            );
            tokio::spawn(poller.run(shutdown.resubscribe()));
        }

        let grace = Duration::from_secs(self.config.listener.shutdown_grace_secs);
        let (draining_tx, draining_rx) = oneshot::channel::<()>();
        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received, draining connections");
            let _ = draining_tx.send(());
        })
        .into_future();

        let deadline = async move {
            if draining_rx.await.is_ok() {
                tokio::time::sleep(grace).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = serve => result?,
            _ = deadline => {
                tracing::warn!(
                    pending_keys = self.registry.pending_keys(),
                    "Grace period elapsed, dropping parked requests"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The registry shared by every request on this server.
    pub fn registry(&self) -> &Arc<NotificationRegistry> {
        &self.registry
    }
}
