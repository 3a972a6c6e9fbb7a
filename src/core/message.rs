//! GELF message construction
//!
//! A `LogMessage` is built fresh for every log call, serialized once and
//! discarded. Standard fields are never `_`-prefixed; every caller-supplied
//! key is, so metadata lands in GELF additional fields.

use super::config::EmitterConfig;
use super::error::Result;
use super::field_value::{FieldValue, Metadata};
use super::severity::Severity;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

pub const VERSION_FIELD: &str = "version";
pub const HOST_FIELD: &str = "host";
pub const LEVEL_FIELD: &str = "level";
pub const TIMESTAMP_FIELD: &str = "timestamp";
pub const SHORT_MESSAGE_FIELD: &str = "short_message";
pub const FULL_MESSAGE_FIELD: &str = "full_message";

/// Prefix GELF requires on additional fields
pub const ADDITIONAL_FIELD_PREFIX: char = '_';

/// A single GELF payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogMessage {
    fields: BTreeMap<String, FieldValue>,
}

impl LogMessage {
    /// Get a field by its wire name
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// All fields, keyed by wire name
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Numeric `level` field
    pub fn level(&self) -> Option<i64> {
        self.get(LEVEL_FIELD).and_then(FieldValue::as_i64)
    }

    /// Unix seconds at build time
    pub fn timestamp(&self) -> Option<i64> {
        self.get(TIMESTAMP_FIELD).and_then(FieldValue::as_i64)
    }

    pub fn short_message(&self) -> Option<&str> {
        self.get(SHORT_MESSAGE_FIELD).and_then(FieldValue::as_str)
    }

    pub fn full_message(&self) -> Option<&str> {
        self.get(FULL_MESSAGE_FIELD).and_then(FieldValue::as_str)
    }

    /// Encode as a compact JSON object
    ///
    /// # Errors
    ///
    /// Fails if a metadata value has no JSON form (non-finite floats).
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Normalize a caller key into a GELF additional field name
pub fn additional_field_name(key: &str) -> String {
    if key.starts_with(ADDITIONAL_FIELD_PREFIX) {
        key.to_string()
    } else {
        format!("{}{}", ADDITIONAL_FIELD_PREFIX, key)
    }
}

/// Assemble a GELF message
///
/// `level` starts at the configured default and is replaced by
/// `level_override` when one is given. The info call passes `None`, so it
/// reports whatever default the emitter was configured with.
///
/// Metadata is merged last, in key order. Keys colliding after prefixing
/// (`path` and `_path`) resolve last-write-wins without a diagnostic.
pub fn build_message(
    config: &EmitterConfig,
    level_override: Option<Severity>,
    short_message: &str,
    full_message: &str,
    metadata: &Metadata,
) -> LogMessage {
    let mut fields = BTreeMap::new();
    fields.insert(VERSION_FIELD.to_string(), FieldValue::from(config.version()));
    fields.insert(HOST_FIELD.to_string(), FieldValue::from(config.hostname()));
    fields.insert(
        LEVEL_FIELD.to_string(),
        FieldValue::from(config.default_level().as_u8()),
    );
    fields.insert(
        TIMESTAMP_FIELD.to_string(),
        FieldValue::Int(Utc::now().timestamp()),
    );
    fields.insert(SHORT_MESSAGE_FIELD.to_string(), FieldValue::from(short_message));
    fields.insert(FULL_MESSAGE_FIELD.to_string(), FieldValue::from(full_message));

    if let Some(level) = level_override {
        fields.insert(LEVEL_FIELD.to_string(), FieldValue::from(level.as_u8()));
    }

    for (key, value) in metadata.iter() {
        fields.insert(additional_field_name(key), value.clone());
    }

    LogMessage { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmitterConfig {
        EmitterConfig::new("graylog", 12201, "api-gateway")
    }

    #[test]
    fn test_required_fields_present() {
        let msg = build_message(&config(), Some(Severity::Error), "short", "long", &Metadata::new());

        assert_eq!(msg.get(VERSION_FIELD).and_then(FieldValue::as_str), Some("1.1"));
        assert_eq!(msg.get(HOST_FIELD).and_then(FieldValue::as_str), Some("api-gateway"));
        assert_eq!(msg.level(), Some(3));
        assert_eq!(msg.short_message(), Some("short"));
        assert_eq!(msg.full_message(), Some("long"));
        assert!(msg.timestamp().is_some());
        assert_eq!(msg.fields().len(), 6);
    }

    #[test]
    fn test_override_ignores_default_level() {
        let cfg = config().with_default_level(Severity::Error);
        for severity in [
            Severity::Debug,
            Severity::Notice,
            Severity::Warning,
            Severity::Critical,
            Severity::Alert,
        ] {
            let msg = build_message(&cfg, Some(severity), "s", "l", &Metadata::new());
            assert_eq!(msg.level(), Some(i64::from(severity.as_u8())));
        }
    }

    #[test]
    fn test_no_override_keeps_default_level() {
        let msg = build_message(&config(), None, "s", "l", &Metadata::new());
        assert_eq!(msg.level(), Some(6));

        let cfg = config().with_default_level(Severity::Error);
        let msg = build_message(&cfg, None, "s", "l", &Metadata::new());
        assert_eq!(msg.level(), Some(3));
    }

    #[test]
    fn test_metadata_prefixing() {
        let meta = Metadata::new()
            .with_field("path", "/x")
            .with_field("_request_id", "abc")
            .with_field("status", 404);

        let msg = build_message(&config(), None, "s", "l", &meta);

        assert_eq!(msg.get("_path"), Some(&FieldValue::from("/x")));
        assert_eq!(msg.get("_request_id"), Some(&FieldValue::from("abc")));
        assert_eq!(msg.get("_status"), Some(&FieldValue::Int(404)));
        assert!(msg.get("path").is_none());
        assert!(msg.get("__request_id").is_none());
    }

    #[test]
    fn test_metadata_cannot_replace_standard_fields() {
        let meta = Metadata::new().with_field("level", 0).with_field("host", "spoofed");
        let msg = build_message(&config(), Some(Severity::Debug), "s", "l", &meta);

        assert_eq!(msg.level(), Some(7));
        assert_eq!(msg.get(HOST_FIELD).and_then(FieldValue::as_str), Some("api-gateway"));
        assert_eq!(msg.get("_level"), Some(&FieldValue::Int(0)));
        assert_eq!(msg.get("_host").and_then(FieldValue::as_str), Some("spoofed"));
    }

    #[test]
    fn test_colliding_metadata_keys_last_write_wins() {
        let meta = Metadata::new()
            .with_field("_path", "prefixed")
            .with_field("path", "plain");
        let msg = build_message(&config(), None, "s", "l", &meta);

        assert_eq!(msg.get("_path").and_then(FieldValue::as_str), Some("plain"));
    }

    #[test]
    fn test_timestamp_near_now() {
        let before = Utc::now().timestamp();
        let msg = build_message(&config(), None, "s", "l", &Metadata::new());
        let after = Utc::now().timestamp();

        let ts = msg.timestamp().unwrap();
        assert!(ts >= before && ts <= after, "timestamp {} outside [{}, {}]", ts, before, after);
    }

    #[test]
    fn test_to_json_shape() {
        let meta = Metadata::new().with_field("latency", 1.25);
        let msg = build_message(&config(), Some(Severity::Warning), "s", "l", &meta);

        let parsed: serde_json::Value = serde_json::from_slice(&msg.to_json().unwrap()).unwrap();
        assert_eq!(parsed["level"], 4);
        assert!(parsed["timestamp"].is_i64());
        assert_eq!(parsed["_latency"], 1.25);
        assert_eq!(parsed["version"], "1.1");
    }

    #[test]
    fn test_to_json_rejects_nan() {
        let meta = Metadata::new().with_field("ratio", f64::NAN);
        let msg = build_message(&config(), None, "s", "l", &meta);
        assert!(msg.to_json().is_err());
    }
}
