//! Configuration types

use crate::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_REMOTE_CONNECT_TIMEOUT_SECS, DEFAULT_REMOTE_TIMEOUT_SECS,
};
use rivet_application::CollisionPolicy;
use rivet_application::ports::registry::RemoteProviderConfig;
use rivet_providers::constants::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_RECONNECT_DELAY_MS, DEFAULT_SEND_TIMEOUT_MS,
};
use rivet_providers::SseOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Container assembly configuration
    pub container: ContainerConfig,
    /// Remote invocation configuration
    pub remote: RemoteConfig,
    /// Server-sent events configuration
    pub sse: SseConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json_format: bool,
    /// Log to a daily rolling file in addition to stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Container assembly configuration
///
/// Singletons are lazy unless marked eager, so a cycle between lazy
/// singletons surfaces at first resolution. Set `eager_singletons` to
/// create every singleton during assembly and fail startup on such cycles
/// and on failing providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Instantiate every singleton during assembly
    pub eager_singletons: bool,
    /// What to do when two remote factory providers declare one protocol
    pub protocol_collision: CollisionPolicy,
}

/// Remote invocation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// User agent sent by HTTP transports
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_REMOTE_CONNECT_TIMEOUT_SECS,
            user_agent: format!("rivet/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RemoteConfig {
    /// Settings handed to remote factory provider factories
    pub fn provider_config(&self) -> RemoteProviderConfig {
        RemoteProviderConfig::default()
            .with_timeout_secs(self.timeout_secs)
            .with_connect_timeout_secs(self.connect_timeout_secs)
            .with_user_agent(self.user_agent.clone())
    }
}

/// Server-sent events configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SseConfig {
    /// Events buffered per subscriber channel
    pub channel_capacity: usize,
    /// Send timeout per subscriber in milliseconds
    pub send_timeout_ms: u64,
    /// Reconnection delay advertised to clients in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for SseConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
        }
    }
}

impl SseConfig {
    /// Channel and delivery options
    pub fn options(&self) -> SseOptions {
        SseOptions {
            channel_capacity: self.channel_capacity,
            send_timeout: Duration::from_millis(self.send_timeout_ms),
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
        }
    }
}
