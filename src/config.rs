//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between whole-cache clears, 0 = never
    pub eviction_interval: u64,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Seconds to wait after a shutdown signal before stopping
    pub stop_timeout: u64,
    /// Append a short time-derived code to error messages
    pub msg_short_code: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `EVICTION_INTERVAL` - Whole-cache clear interval in seconds, 0 disables (default: 60)
    /// - `REQUEST_TIMEOUT` - Per-request timeout in seconds (default: 10)
    /// - `STOP_TIMEOUT` - Shutdown grace wait in seconds (default: 3)
    /// - `MSG_SHORT_CODE` - `true` to tag error messages with a short code (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            eviction_interval: env_or("EVICTION_INTERVAL", defaults.eviction_interval),
            request_timeout: env_or("REQUEST_TIMEOUT", defaults.request_timeout),
            stop_timeout: env_or("STOP_TIMEOUT", defaults.stop_timeout),
            msg_short_code: env_or("MSG_SHORT_CODE", defaults.msg_short_code),
        }
    }

    /// Eviction period, None when eviction is disabled.
    pub fn eviction_period(&self) -> Option<Duration> {
        (self.eviction_interval > 0).then(|| Duration::from_secs(self.eviction_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            eviction_interval: 60,
            request_timeout: 10,
            stop_timeout: 3,
            msg_short_code: false,
        }
    }
}

/// Parses an environment variable, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
