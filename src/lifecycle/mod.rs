//! Process lifecycle.
//!
//! ```text
//! startup.rs  CONFFILE check (master only) → helper list logged → metrics → bind → HttpServer::run
//! signals.rs  SIGINT / SIGTERM ─┐
//! shutdown.rs                   └→ Shutdown::trigger → server drains, poller stops
//!                                   parked waiters dropped after shutdown_grace_secs
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, StartupError};
