//! In-memory transport
//!
//! Captures encoded payloads instead of sending them. Clones share the same
//! buffer, so a handle kept by the caller sees what the emitter sent.

use super::Transport;
use crate::core::{GelfError, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    payloads: Arc<Mutex<Vec<Vec<u8>>>>,
    attempts: Arc<AtomicU64>,
    unreachable: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every send fails, for exercising error paths
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Raw payloads in send order
    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.payloads.lock().clone()
    }

    /// Payloads decoded as JSON
    ///
    /// Payloads that are not valid JSON decode to `Value::Null`.
    pub fn messages(&self) -> Vec<serde_json::Value> {
        self.payloads
            .lock()
            .iter()
            .map(|p| serde_json::from_slice(p).unwrap_or(serde_json::Value::Null))
            .collect()
    }

    /// Number of `send` calls, including failed ones
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.payloads.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.lock().is_empty()
    }

    pub fn clear(&self) {
        self.payloads.lock().clear();
    }
}

impl Transport for MemoryTransport {
    fn send(&self, payload: &[u8]) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if self.unreachable {
            return Err(GelfError::transport("memory transport is unreachable"));
        }
        self.payloads.lock().push(payload.to_vec());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let transport = MemoryTransport::new();
        let handle = transport.clone();

        transport.send(br#"{"a":1}"#).unwrap();
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.messages()[0]["a"], 1);

        handle.clear();
        assert!(transport.is_empty());
        assert_eq!(transport.attempts(), 1);
    }

    #[test]
    fn test_unreachable_counts_attempts() {
        let transport = MemoryTransport::unreachable();
        assert!(transport.send(b"{}").is_err());
        assert!(transport.send(b"{}").is_err());
        assert_eq!(transport.attempts(), 2);
        assert!(transport.is_empty());
    }
}
