//! Configuration server library.
//!
//! Serves a JSON document over HTTP: `GET /a/b` resolves a path,
//! `POST /a/b` fills the request body as a template with the value there,
//! `PUT /a/b` releases everyone long-polling `/a/b?wait`.
//!
//! # Architecture Overview
//!
//! ```text
//!   request ──▶ http (middleware, classify) ──▶ coordinator
//!                                                  │
//!                      ┌───────────────────────────┼──────────────────┐
//!                      ▼                           ▼                  ▼
//!                notification               tree (resolve)      template
//!               (wait/trigger)            fresh read per req    (render)
//!
//!   follower mode: http ──▶ replication::redirect, replication::poller
//! ```

// Core
pub mod coordinator;
pub mod notification;
pub mod template;
pub mod tree;

// Service surface
pub mod config;
pub mod http;
pub mod replication;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use coordinator::{CoreRequest, Outcome, RequestCoordinator};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use notification::NotificationRegistry;
pub use template::TemplateRenderer;
