//! Metrics collection and exposition.
//!
//! # Metrics
//! - `confserver_requests_total` (counter): requests by method (GET, POST, PUT, other) and status
//! - `confserver_request_duration_seconds` (histogram): latency by method
//! - `confserver_waiters` (gauge): requests parked on a gate
//! - `confserver_triggers_total` (counter): triggers, labelled by whether anyone was released

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method_label(method);
    counter!(
        "confserver_requests_total",
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("confserver_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Clients choose the method, so anything unserved shares one label.
fn method_label(method: &str) -> &'static str {
    match method.to_ascii_uppercase().as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        _ => "other",
    }
}

pub fn record_waiter_parked() {
    gauge!("confserver_waiters").increment(1.0);
}

pub fn record_waiter_released() {
    gauge!("confserver_waiters").decrement(1.0);
}

pub fn record_trigger(released: usize) {
    let released = if released > 0 { "true" } else { "false" };
    counter!("confserver_triggers_total", "released" => released).increment(1);
}
