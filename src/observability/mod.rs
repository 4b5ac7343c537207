//! Logs and metrics.
//!
//! ```text
//! handlers, registry, poller
//!     → logging.rs: tracing events, one line per request, filtered by RUST_LOG or log_level
//!     → metrics.rs: request counts and latency, parked waiters, triggers
//!         → Prometheus listener on metrics_address when metrics_enabled
//! ```

pub mod logging;
pub mod metrics;
