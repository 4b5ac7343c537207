//! Configuration validation.
//!
//! Semantic checks only (serde handles syntax). Returns every problem found,
//! not just the first.

use std::fmt;

use url::Url;

use crate::config::schema::ServerConfig;
use crate::security::subnet::Subnet;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::new("listener.port", "must be non-zero"));
    }

    if config.listener.bind_host.is_empty() {
        errors.push(ValidationError::new("listener.bind_host", "must not be empty"));
    }

    if config.document.path.as_os_str().is_empty() {
        errors.push(ValidationError::new("document.path", "no document file given"));
    }

    if let Some(master) = &config.replication.master {
        if let Err(message) = validate_master(master) {
            errors.push(ValidationError::new("replication.master", message));
        }
        if config.replication.poll_interval_secs == 0 {
            errors.push(ValidationError::new(
                "replication.poll_interval_secs",
                "must be at least 1",
            ));
        }
    }

    for subnet in &config.access.allowed_subnets {
        if let Err(e) = subnet.parse::<Subnet>() {
            errors.push(ValidationError::new("access.allowed_subnets", e.to_string()));
        }
    }

    if config.limits.max_template_bytes == 0 {
        errors.push(ValidationError::new("limits.max_template_bytes", "must be non-zero"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address {:?}", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A master is a bare `host:port`; the scheme is always http.
fn validate_master(master: &str) -> Result<(), String> {
    if master.contains("://") {
        return Err(format!("{:?} must be host:port without a scheme", master));
    }
    let url = Url::parse(&format!("http://{}", master))
        .map_err(|e| format!("{:?} is not a valid host:port: {}", master, e))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("{:?} has no host", master));
    }
    if url.path() != "/" || url.query().is_some() {
        return Err(format!("{:?} must not carry a path or query", master));
    }
    Ok(())
}
