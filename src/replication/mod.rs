//! Follower mode.
//!
//! # Data Flow
//! ```text
//! client request → redirect.rs → 307 Location: http://MASTER/<path?query>
//!
//! poller.rs (background):
//!     GET http://MASTER/?wait   (parks until the master's "/" is triggered)
//!     → CONFFILE.YYYY-MM-DD--HH-MM-SS   (local backup)
//!     → sleep poll_interval_secs → repeat
//! ```
//!
//! # Design Decisions
//! - A follower never serves its own document; it only keeps backups
//! - Fetch failures are logged and retried on the next round

pub mod poller;
pub mod redirect;

pub use poller::{backup_path, MasterPoller, ReplicationError};
pub use redirect::{redirect_handler, master_location};
