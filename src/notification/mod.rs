//! Long-poll wait/trigger synchronization.
//!
//! # Data Flow
//! ```text
//! GET /db?wait  → registry.wait_for("/db")  (gate created on miss, request parked)
//! GET /db?wait  → registry.wait_for("/db")  (joins the same gate)
//! PUT /db       → registry.trigger("/db")   (gate removed, both waiters released)
//! ```
//!
//! # Design Decisions
//! - Gates are single-use: a trigger removes the gate, the next wait makes a new one
//! - A trigger nobody waits for is forgotten, not remembered
//! - The registry lock covers lookup/create/remove only, never the release

pub mod registry;

pub use registry::{Gate, NotificationRegistry};
