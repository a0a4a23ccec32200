//! Runtime options shared by both updaters.

use std::time::Duration;

/// Default request timeout for DuckDNS.
pub const DUCKDNS_DEFAULT_TIMEOUT: &str = "60";

/// Default request timeout for FreeDNS.
pub const FREEDNS_DEFAULT_TIMEOUT: &str = "10";

/// Options threaded into every provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Verbosity level (count of `-v` flags).
    pub verbosity: u8,
}

impl UpdateOptions {
    pub fn new(timeout: Duration, verbosity: u8) -> Self {
        Self { timeout, verbosity }
    }

    /// Print the request URL and raw response.
    pub fn echo(&self) -> bool {
        self.verbosity >= 1
    }

    /// Ask the provider for a verbose answer too.
    pub fn server_verbose(&self) -> bool {
        self.verbosity >= 2
    }
}

/// Parse a timeout given in (possibly fractional) seconds.
pub fn parse_timeout(value: &str) -> std::result::Result<Duration, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| format!("invalid timeout value {}", value))
}

/// Resolve environment variable references (values starting with $).
pub fn resolve_env(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        std::env::var(var_name).unwrap_or_else(|_| {
            tracing::warn!("Environment variable {} not set", var_name);
            value.to_string()
        })
    } else {
        value.to_string()
    }
}
