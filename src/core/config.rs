//! Emitter configuration and environment-driven settings
//!
//! Two environment variables control the emitter:
//! - `GELF_LOG_LEVEL`: default severity, read once at construction
//! - `GELF_DISABLED`: kill switch, consulted on delivery

use super::error::{GelfError, Result};
use super::severity::Severity;
use std::time::Duration;

/// GELF protocol version written to every message
pub const GELF_VERSION: &str = "1.1";

/// Path of the GELF HTTP input
pub const GELF_HTTP_PATH: &str = "/gelf";

/// Environment variable holding the default severity
pub const LOG_LEVEL_ENV: &str = "GELF_LOG_LEVEL";

/// Environment variable acting as the kill switch
pub const DISABLED_ENV: &str = "GELF_DISABLED";

/// Parse a `GELF_LOG_LEVEL` value
///
/// The value must be an integer within the syslog range 0-7. Surrounding
/// whitespace is rejected like any other non-integer text.
pub fn parse_log_level(raw: &str) -> Result<Severity> {
    let value: i64 = raw.parse().map_err(|_| {
        GelfError::config(LOG_LEVEL_ENV, format!("'{}' is not an integer", raw))
    })?;
    Severity::try_from(value).map_err(|msg| GelfError::config(LOG_LEVEL_ENV, msg))
}

/// Resolve the default severity through an environment lookup
///
/// Unset or empty yields `Severity::Info`.
pub fn default_level_from_lookup<F>(lookup: F) -> Result<Severity>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(LOG_LEVEL_ENV) {
        Some(raw) if !raw.is_empty() => parse_log_level(&raw),
        _ => Ok(Severity::Info),
    }
}

/// Resolve the default severity from the process environment
pub fn default_level_from_env() -> Result<Severity> {
    default_level_from_lookup(|key| std::env::var(key).ok())
}

/// Whether a `GELF_DISABLED` value turns delivery off
///
/// Unset and empty leave delivery on, as do `"0"` and any casing of `"false"`.
/// Every other value disables delivery.
pub fn is_disabled_value(value: Option<&str>) -> bool {
    match value {
        None | Some("") => false,
        Some(v) => !(v.eq_ignore_ascii_case("false") || v == "0"),
    }
}

/// How the kill switch is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KillSwitch {
    /// Re-read `GELF_DISABLED` on every delivery, so operators can silence
    /// a running process without a restart
    #[default]
    Live,

    /// Fixed state; `true` suppresses all delivery
    Fixed(bool),
}

impl KillSwitch {
    /// Snapshot `GELF_DISABLED` once; later changes require a restart
    pub fn from_env() -> Self {
        KillSwitch::Fixed(is_disabled_value(std::env::var(DISABLED_ENV).ok().as_deref()))
    }

    /// Whether delivery is currently suppressed
    pub fn is_engaged(&self) -> bool {
        match self {
            KillSwitch::Live => is_disabled_value(std::env::var(DISABLED_ENV).ok().as_deref()),
            KillSwitch::Fixed(disabled) => *disabled,
        }
    }
}

/// Static configuration of an emitter
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    graylog_host: String,
    graylog_port: u16,
    hostname: String,
    default_level: Severity,
    kill_switch: KillSwitch,
    timeout: Option<Duration>,
}

impl EmitterConfig {
    /// Create a configuration with `Severity::Info` as the default level
    ///
    /// # Arguments
    ///
    /// * `graylog_host` - Host of the Graylog HTTP input
    /// * `graylog_port` - Port of the Graylog HTTP input
    /// * `hostname` - Label written to the `host` field of every message
    pub fn new(
        graylog_host: impl Into<String>,
        graylog_port: u16,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            graylog_host: graylog_host.into(),
            graylog_port,
            hostname: hostname.into(),
            default_level: Severity::Info,
            kill_switch: KillSwitch::Live,
            timeout: None,
        }
    }

    /// Create a configuration whose default level comes from `GELF_LOG_LEVEL`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the variable is set but is not an
    /// integer in 0-7.
    pub fn from_env(
        graylog_host: impl Into<String>,
        graylog_port: u16,
        hostname: impl Into<String>,
    ) -> Result<Self> {
        Self::from_lookup(graylog_host, graylog_port, hostname, |key| {
            std::env::var(key).ok()
        })
    }

    /// Same as [`EmitterConfig::from_env`] with an injectable lookup
    pub fn from_lookup<F>(
        graylog_host: impl Into<String>,
        graylog_port: u16,
        hostname: impl Into<String>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_level = default_level_from_lookup(lookup)?;
        Ok(Self::new(graylog_host, graylog_port, hostname).with_default_level(default_level))
    }

    /// Set the severity `info` reports
    #[must_use]
    pub fn with_default_level(mut self, level: Severity) -> Self {
        self.default_level = level;
        self
    }

    /// Set when the kill switch is evaluated
    #[must_use]
    pub fn with_kill_switch(mut self, kill_switch: KillSwitch) -> Self {
        self.kill_switch = kill_switch;
        self
    }

    /// Bound each HTTP round trip; unbounded by default
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the Graylog host name or address
    pub fn graylog_host(&self) -> &str {
        &self.graylog_host
    }

    /// Get the port of the GELF HTTP input
    pub fn graylog_port(&self) -> u16 {
        self.graylog_port
    }

    /// Get the `host` reported in every message
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// GELF version, always [`GELF_VERSION`]
    pub fn version(&self) -> &'static str {
        GELF_VERSION
    }

    /// Get the severity `info` reports
    pub fn default_level(&self) -> Severity {
        self.default_level
    }

    /// Get the kill switch mode
    pub fn kill_switch(&self) -> KillSwitch {
        self.kill_switch
    }

    /// Get the per-request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full URL of the GELF HTTP input
    pub fn endpoint_url(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.graylog_host, self.graylog_port, GELF_HTTP_PATH
        )
    }
}
