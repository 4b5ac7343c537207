//! Axum middleware.

pub mod access_control;
pub mod logging;

pub use access_control::{access_control_middleware, AccessControlState};
pub use logging::request_log_middleware;
