//! Configuration tree resolution.
//!
//! # Data Flow
//! ```text
//! request path "/db/host"
//!     → path.rs (split on '/', drop empty segments)
//!     → document.rs (read the JSON file from disk, fresh per request)
//!     → resolve.rs (walk the object tree, sub-tree or leaf)
//!     → serde_json::Value (served as JSON or raw text, or fed to a template)
//! ```
//!
//! # Design Decisions
//! - No cache: every resolution reads what is on disk right now
//! - The resolver is a pure function over `serde_json::Value`
//! - A missing key is `NotFound` (404), everything else is an internal error

pub mod document;
pub mod path;
pub mod resolve;

pub use document::DocumentSource;
pub use path::PathComponents;
pub use resolve::{resolve, resolve_bytes, to_body, ResolveError};
