//! Access Control Middleware.
//! Rejects peers outside the allowed subnets.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::security::SubnetList;

/// State required for access control.
#[derive(Clone)]
pub struct AccessControlState {
    pub allowed: Arc<SubnetList>,
    pub enabled: bool,
}

pub async fn access_control_middleware(
    State(state): State<AccessControlState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.enabled || state.allowed.contains(peer.ip()) {
        return next.run(req).await;
    }

    tracing::warn!(peer = %peer, uri = %req.uri(), "Access denied");
    (StatusCode::FORBIDDEN, "access denied").into_response()
}
