//! One log line per request: peer, method, URI.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::Response,
};

pub async fn request_log_middleware(
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::info!(
        request_id = %request_id,
        peer = %peer,
        method = %req.method().as_str().to_ascii_uppercase(),
        uri = %req.uri(),
        "Request"
    );

    next.run(req).await
}
