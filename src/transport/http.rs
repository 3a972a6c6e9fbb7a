//! GELF-over-HTTP transport
//!
//! Posts each message to `http://{host}:{port}/gelf` with a blocking client.
//! The response status is not inspected; any completed round trip counts as
//! delivered.
//!
//! The blocking client must never be built, used or dropped on a tokio
//! runtime thread. When one is detected, that work moves to a plain thread
//! and the caller still blocks until the round trip completes.

use super::Transport;
use crate::core::{EmitterConfig, GelfError, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::thread;
use std::time::Duration;
use tokio::runtime::Handle;

/// Transport that sends GELF messages to a Graylog HTTP input
///
/// Safe to call from synchronous code and from async tasks alike. Inside a
/// runtime each send occupies the calling worker for the whole round trip.
///
/// # Example
///
/// ```no_run
/// use gelf_emitter::transport::{HttpTransport, Transport};
///
/// let transport = HttpTransport::new("http://127.0.0.1:12201/gelf", None)
///     .expect("Failed to build HTTP client");
/// let _ = transport.send(br#"{"version":"1.1","host":"demo","short_message":"hi"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    url: String,
    /// Only `None` while dropping
    client: Option<Client>,
}

/// Whether the current thread is driven by a tokio runtime
fn on_runtime() -> bool {
    Handle::try_current().is_ok()
}

/// Run `f` on a scoped plain thread when called from a runtime thread
fn off_runtime<T, F>(f: F) -> thread::Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    if on_runtime() {
        thread::scope(|scope| scope.spawn(f).join())
    } else {
        Ok(f())
    }
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    ///
    /// * `url` - Full URL of the GELF HTTP input
    /// * `timeout` - Optional bound on each request; `None` waits indefinitely
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let client = off_runtime(move || Client::builder().timeout(timeout).build())
            .map_err(|_| GelfError::config("HttpTransport", "client initialization panicked"))?
            .map_err(|e| GelfError::config("HttpTransport", e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client: Some(client),
        })
    }

    /// Create a transport for the endpoint and timeout in `config`
    pub fn from_config(config: &EmitterConfig) -> Result<Self> {
        Self::new(config.endpoint_url(), config.timeout())
    }

    /// Get the URL messages are posted to
    pub fn url(&self) -> &str {
        &self.url
    }

    fn post(&self, client: &Client, payload: &[u8]) -> Result<()> {
        client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_vec())
            .send()
            .map_err(|e| GelfError::delivery(&self.url, e.to_string()))?;
        Ok(())
    }
}

impl Transport for HttpTransport {
    fn send(&self, payload: &[u8]) -> Result<()> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| GelfError::delivery(&self.url, "HTTP client already released"))?;

        off_runtime(|| self.post(client, payload))
            .map_err(|_| GelfError::delivery(&self.url, "HTTP round trip panicked"))?
    }

    fn name(&self) -> &str {
        "http"
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        // The last client handle shuts down reqwest's internal runtime
        if let Some(client) = self.client.take() {
            if on_runtime() {
                thread::spawn(move || drop(client));
            }
        }
    }
}
