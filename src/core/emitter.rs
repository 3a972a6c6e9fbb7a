//! GELF emitter facade
//!
//! One method per exposed severity. Each builds a message, then delivers it.
//! Delivery failures never reach the caller; they are counted in
//! [`EmitterMetrics`] and reported through the error handler.

use super::{
    config::{default_level_from_env, EmitterConfig, KillSwitch},
    error::{GelfError, Result},
    field_value::Metadata,
    message::{build_message, LogMessage},
    metrics::EmitterMetrics,
    severity::Severity,
};
use crate::transport::{self, Delivery, Transport};
use std::sync::Arc;
use std::time::Duration;

/// Callback receiving serialization and delivery errors
pub type ErrorHandler = Arc<dyn Fn(&GelfError) + Send + Sync>;

/// Default error handler: one line on stderr per failure
pub fn report_to_stderr(err: &GelfError) {
    eprintln!("[GELF ERROR] {}", err);
}

/// Emits GELF messages to a Graylog endpoint
///
/// Construct once at startup and share it (for example behind an `Arc`);
/// the emitter is never mutated after construction, so concurrent calls need
/// no locking.
///
/// Every call blocks until the message is handed off or has failed. With the
/// HTTP transport that is a full round trip. Calling from async code is safe:
/// when a tokio runtime drives the current thread, the HTTP work runs on a
/// separate plain thread, so the call never panics but still occupies the
/// worker until it returns. Construction and drop are safe there too.
///
/// # Example
///
/// ```no_run
/// use gelf_emitter::prelude::*;
///
/// let emitter = Emitter::new("graylog.internal", 12201, "billing-api");
///
/// emitter.error(
///     "payment declined",
///     "payment declined\ncard expired",
///     &Metadata::new().with_field("order_id", 1042),
/// );
/// ```
pub struct Emitter {
    config: EmitterConfig,
    transport: Box<dyn Transport>,
    metrics: Arc<EmitterMetrics>,
    on_error: ErrorHandler,
}

impl Emitter {
    /// Create an emitter posting to `http://{host}:{port}/gelf`
    ///
    /// The default level is read from `GELF_LOG_LEVEL` (Info when unset).
    ///
    /// # Panics
    ///
    /// Panics if `GELF_LOG_LEVEL` is set to anything other than an integer
    /// in 0-7. A broken log level is a broken deployment.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, hostname: impl Into<String>) -> Self {
        match Self::try_new(host, port, hostname) {
            Ok(emitter) => emitter,
            Err(e) => panic!("GELF emitter cannot start: {}", e),
        }
    }

    /// Fallible version of [`Emitter::new`]
    #[cfg(feature = "http")]
    pub fn try_new(
        host: impl Into<String>,
        port: u16,
        hostname: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(host, port, hostname).build()
    }

    /// Create an emitter from an explicit configuration and transport
    pub fn with_transport(config: EmitterConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            metrics: Arc::new(EmitterMetrics::new()),
            on_error: Arc::new(report_to_stderr),
        }
    }

    pub fn builder(
        host: impl Into<String>,
        port: u16,
        hostname: impl Into<String>,
    ) -> EmitterBuilder {
        EmitterBuilder::new(host, port, hostname)
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn default_level(&self) -> Severity {
        self.config.default_level()
    }

    pub fn metrics(&self) -> &EmitterMetrics {
        &self.metrics
    }

    /// Shared handle to the metrics, for exporters living elsewhere
    pub fn metrics_handle(&self) -> Arc<EmitterMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Build a message without sending it
    ///
    /// `None` keeps the configured default level, which is what
    /// [`Emitter::info`] does.
    pub fn build_message(
        &self,
        level_override: Option<Severity>,
        short_message: &str,
        full_message: &str,
        metadata: &Metadata,
    ) -> LogMessage {
        build_message(
            &self.config,
            level_override,
            short_message,
            full_message,
            metadata,
        )
    }

    /// Deliver a built message, reporting rather than returning failures
    pub fn deliver(&self, message: &LogMessage) {
        match transport::deliver(self.transport.as_ref(), self.config.kill_switch(), message) {
            Ok(Delivery::Sent) => {
                self.metrics.record_sent();
            }
            Ok(Delivery::Suppressed) => {
                self.metrics.record_suppressed();
            }
            Err(e) => {
                match &e {
                    GelfError::Serialization(_) => self.metrics.record_serialization_failure(),
                    _ => self.metrics.record_delivery_failure(),
                };
                (self.on_error)(&e);
            }
        }
    }

    fn emit(
        &self,
        level_override: Option<Severity>,
        short_message: &str,
        full_message: &str,
        metadata: &Metadata,
    ) {
        let message = self.build_message(level_override, short_message, full_message, metadata);
        self.deliver(&message);
    }

    pub fn debug(&self, short_message: &str, full_message: &str, metadata: &Metadata) {
        self.emit(Some(Severity::Debug), short_message, full_message, metadata);
    }

    /// Log at the configured default level
    ///
    /// Unlike the other methods this does not force a level: with
    /// `GELF_LOG_LEVEL=3` an info call is sent with `level` 3.
    pub fn info(&self, short_message: &str, full_message: &str, metadata: &Metadata) {
        self.emit(None, short_message, full_message, metadata);
    }

    pub fn notice(&self, short_message: &str, full_message: &str, metadata: &Metadata) {
        self.emit(Some(Severity::Notice), short_message, full_message, metadata);
    }

    pub fn warning(&self, short_message: &str, full_message: &str, metadata: &Metadata) {
        self.emit(Some(Severity::Warning), short_message, full_message, metadata);
    }

    pub fn error(&self, short_message: &str, full_message: &str, metadata: &Metadata) {
        self.emit(Some(Severity::Error), short_message, full_message, metadata);
    }

    pub fn critical(&self, short_message: &str, full_message: &str, metadata: &Metadata) {
        self.emit(Some(Severity::Critical), short_message, full_message, metadata);
    }

    pub fn alert(&self, short_message: &str, full_message: &str, metadata: &Metadata) {
        self.emit(Some(Severity::Alert), short_message, full_message, metadata);
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("config", &self.config)
            .field("transport", &self.transport.name())
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Emitter`]
pub struct EmitterBuilder {
    host: String,
    port: u16,
    hostname: String,
    default_level: Option<Severity>,
    kill_switch: KillSwitch,
    timeout: Option<Duration>,
    transport: Option<Box<dyn Transport>>,
    on_error: Option<ErrorHandler>,
}

impl EmitterBuilder {
    /// Create a new builder with default values
    pub fn new(host: impl Into<String>, port: u16, hostname: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            hostname: hostname.into(),
            default_level: None,
            kill_switch: KillSwitch::Live,
            timeout: None,
            transport: None,
            on_error: None,
        }
    }

    /// Set the default level explicitly instead of reading `GELF_LOG_LEVEL`
    #[must_use = "builder methods return a new value"]
    pub fn default_level(mut self, level: Severity) -> Self {
        self.default_level = Some(level);
        self
    }

    /// Choose how the kill switch is evaluated
    ///
    /// Default is [`KillSwitch::Live`].
    #[must_use = "builder methods return a new value"]
    pub fn kill_switch(mut self, kill_switch: KillSwitch) -> Self {
        self.kill_switch = kill_switch;
        self
    }

    /// Bound each HTTP round trip
    ///
    /// Only applies to the default HTTP transport.
    #[must_use = "builder methods return a new value"]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom transport instead of HTTP
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Set a callback for serialization and delivery errors
    ///
    /// # Example
    ///
    /// ```
    /// use gelf_emitter::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let emitter = Emitter::builder("localhost", 12201, "worker")
    ///     .default_level(Severity::Info)
    ///     .transport(MemoryTransport::new())
    ///     .on_error(Arc::new(|err: &GelfError| {
    ///         eprintln!("telemetry dropped: {}", err);
    ///     }))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self
    }

    /// Build the Emitter
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if no default level was given and
    /// `GELF_LOG_LEVEL` is malformed, or if the HTTP client cannot be built.
    pub fn build(self) -> Result<Emitter> {
        let default_level = match self.default_level {
            Some(level) => level,
            None => default_level_from_env()?,
        };

        let mut config = EmitterConfig::new(self.host, self.port, self.hostname)
            .with_default_level(default_level)
            .with_kill_switch(self.kill_switch);
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(&config)?,
        };

        let mut emitter = Emitter::with_transport(config, transport);
        if let Some(handler) = self.on_error {
            emitter.on_error = handler;
        }
        Ok(emitter)
    }
}

#[cfg(feature = "http")]
fn default_transport(config: &EmitterConfig) -> Result<Box<dyn Transport>> {
    Ok(Box::new(transport::HttpTransport::from_config(config)?))
}

#[cfg(not(feature = "http"))]
fn default_transport(_config: &EmitterConfig) -> Result<Box<dyn Transport>> {
    Err(GelfError::config(
        "EmitterBuilder",
        "no transport given and the `http` feature is disabled",
    ))
}
