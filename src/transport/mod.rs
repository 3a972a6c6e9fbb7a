//! Message delivery
//!
//! `deliver` runs the per-message pipeline: kill switch, serialization,
//! then a single send through a [`Transport`]. No buffering, batching or
//! retries happen here.

#[cfg(feature = "http")]
pub mod http;
pub mod memory;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use memory::MemoryTransport;

use crate::core::{KillSwitch, LogMessage, Result};

/// Destination for serialized GELF payloads
pub trait Transport: Send + Sync {
    /// Send one encoded message
    fn send(&self, payload: &[u8]) -> Result<()>;
    fn name(&self) -> &str;
}

/// What happened to a delivered message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the transport
    Sent,
    /// Skipped because the kill switch is engaged
    Suppressed,
}

/// Serialize `message` and hand it to `transport`
///
/// When the kill switch is engaged nothing is serialized or sent.
///
/// # Errors
///
/// Returns `Serialization` when the message has no JSON form, in which case
/// the transport is never called, or the transport's own error.
pub fn deliver(
    transport: &dyn Transport,
    kill_switch: KillSwitch,
    message: &LogMessage,
) -> Result<Delivery> {
    if kill_switch.is_engaged() {
        return Ok(Delivery::Suppressed);
    }

    let payload = message.to_json()?;
    transport.send(&payload)?;
    Ok(Delivery::Sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{build_message, EmitterConfig, GelfError, Metadata, Severity};

    fn message(metadata: &Metadata) -> LogMessage {
        let config = EmitterConfig::new("graylog", 12201, "test");
        build_message(&config, Some(Severity::Error), "bad req", "bad req\ntrace", metadata)
    }

    #[test]
    fn test_deliver_sends_once() {
        let transport = MemoryTransport::new();
        let outcome = deliver(&transport, KillSwitch::Fixed(false), &message(&Metadata::new()));

        assert_eq!(outcome.unwrap(), Delivery::Sent);
        assert_eq!(transport.len(), 1);
        assert_eq!(transport.messages()[0]["short_message"], "bad req");
    }

    #[test]
    fn test_deliver_suppressed_by_kill_switch() {
        let transport = MemoryTransport::new();
        let outcome = deliver(&transport, KillSwitch::Fixed(true), &message(&Metadata::new()));

        assert_eq!(outcome.unwrap(), Delivery::Suppressed);
        assert!(transport.is_empty());
        assert_eq!(transport.attempts(), 0);
    }

    #[test]
    fn test_serialization_failure_skips_transport() {
        let transport = MemoryTransport::new();
        let metadata = Metadata::new().with_field("ratio", f64::NAN);
        let outcome = deliver(&transport, KillSwitch::Fixed(false), &message(&metadata));

        assert!(matches!(outcome, Err(GelfError::Serialization(_))));
        assert_eq!(transport.attempts(), 0);
    }

    #[test]
    fn test_transport_error_propagates() {
        let transport = MemoryTransport::unreachable();
        let outcome = deliver(&transport, KillSwitch::Fixed(false), &message(&Metadata::new()));

        assert!(matches!(outcome, Err(GelfError::Transport(_))));
        assert_eq!(transport.attempts(), 1);
        assert!(transport.is_empty());
    }
}
