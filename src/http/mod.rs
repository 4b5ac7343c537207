//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (request id, request log line, subnet access control)
//!     → handlers.rs
//!         master:   request.rs (method/query/body → CoreRequest)
//!                   → coordinator → response.rs (Outcome → status, headers, body)
//!         follower: replication::redirect (307 to the master)
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{classify, RequestUuid};
pub use server::{AppState, HttpServer};
