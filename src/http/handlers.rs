//! Request handlers.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::{IntoResponse, Response},
};

use crate::http::request::classify;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Every path and method on a master lands here.
pub async fn config_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let request = classify(&method, &uri, body);
    let outcome = state.coordinator.handle(request).await;

    let response = outcome.into_response();
    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}
