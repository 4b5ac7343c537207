//! Server configuration.
//!
//! # Data Flow
//! ```text
//! server.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (port, master, document path)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! This is the server's own configuration. The JSON document it serves is
//! handled by `tree` and is never cached.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, Overrides};
pub use schema::{
    AccessConfig, DocumentConfig, LimitsConfig, ListenerConfig, ObservabilityConfig,
    ReplicationConfig, ServerConfig,
};
