//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming connection:
//!     → subnet.rs (peer IP inside an allowed CIDR block?)
//!     → http/middleware/access_control.rs (403 when not)
//!     → request handling
//! ```
//!
//! # Design Decisions
//! - IPv4-mapped IPv6 peers are matched against the IPv4 blocks
//! - The allow list is parsed once at startup

pub mod subnet;

pub use subnet::{Subnet, SubnetError, SubnetList};
