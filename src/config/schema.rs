//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file;
//! every field has a default so an empty file is a valid config.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// The JSON document being served.
    pub document: DocumentConfig,

    /// Follower-mode settings.
    pub replication: ReplicationConfig,

    /// Subnet access control.
    pub access: AccessConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServerConfig {
    /// `true` when requests are redirected to a master instead of served.
    pub fn is_follower(&self) -> bool {
        self.replication.master.is_some()
    }

    /// The `host:port` the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.bind_host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// TCP port.
    pub port: u16,

    /// How long parked requests may hold up shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 6666,
            shutdown_grace_secs: 5,
        }
    }
}

/// Served document configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path to the JSON file. Usually given on the command line.
    pub path: PathBuf,
}

/// Replication from a master instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplicationConfig {
    /// Master `host:port`. When set, this instance redirects every request
    /// there and keeps timestamped backups of the master's document.
    pub master: Option<String>,

    /// Pause between two backup fetches, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            master: None,
            poll_interval_secs: 10,
        }
    }
}

/// Access control by peer subnet.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Reject peers outside `allowed_subnets`.
    pub enabled: bool,

    /// CIDR blocks allowed to talk to the server.
    pub allowed_subnets: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_subnets: vec![
                "127.0.0.1/31".to_string(),
                "10.0.0.0/8".to_string(),
                "172.16.0.0/12".to_string(),
                "192.168.0.0/16".to_string(),
                "::1/128".to_string(),
            ],
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum template body accepted by a render request, in bytes.
    pub max_template_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_template_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9166".to_string(),
        }
    }
}
