//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives when neither `RUST_LOG` nor the config say otherwise.
pub const DEFAULT_DIRECTIVES: &str = "confserver=info,tower_http=info";

/// Build the filter: `RUST_LOG` wins, then the configured level.
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) if !level.is_empty() => {
            EnvFilter::new(format!("confserver={level},tower_http={level}"))
        }
        _ => EnvFilter::new(DEFAULT_DIRECTIVES),
    })
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(level: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
