//! Request logging for HTTP servers
//!
//! Framework-agnostic glue: a server hands over a [`RequestSummary`] once a
//! request has completed and [`log_request`] emits one GELF message for it.
//! The status code picks the severity.

use crate::core::{Emitter, Metadata, Severity};
use std::time::Duration;

/// What a completed request looked like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub status: u16,
    pub method: String,
    pub uri: String,
    pub remote_addr: String,
    pub elapsed: Duration,
}

impl RequestSummary {
    pub fn new(
        status: u16,
        method: impl Into<String>,
        uri: impl Into<String>,
        remote_addr: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            status,
            method: method.into(),
            uri: uri.into(),
            remote_addr: remote_addr.into(),
            elapsed,
        }
    }

    /// Whole milliseconds spent serving the request
    pub fn elapsed_ms(&self) -> i64 {
        i64::try_from(self.elapsed.as_millis()).unwrap_or(i64::MAX)
    }

    /// Severity for the status code
    ///
    /// 5xx is critical, 4xx error, 3xx notice, anything else info.
    pub fn severity(&self) -> Severity {
        match self.status {
            500.. => Severity::Critical,
            400..=499 => Severity::Error,
            300..=399 => Severity::Notice,
            _ => Severity::Info,
        }
    }

    /// `"{status} {method} {uri} ({remote_addr}) {elapsed_ms}"`
    pub fn short_message(&self) -> String {
        format!(
            "{} {} {} ({}) {}",
            self.status,
            self.method,
            self.uri,
            self.remote_addr,
            self.elapsed_ms()
        )
    }

    /// Short message, followed by the handler error on its own line
    pub fn full_message(&self, error: Option<&str>) -> String {
        let mut message = self.short_message();
        if let Some(error) = error {
            message.push('\n');
            message.push_str(error);
        }
        message
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new()
            .with_field("status", self.status)
            .with_field("ip", self.remote_addr.as_str())
            .with_field("path", self.uri.as_str())
            .with_field("method", self.method.as_str())
            .with_field("response_time", self.elapsed_ms())
    }
}

/// Emit one message describing a completed request
///
/// Info-range statuses go through [`Emitter::info`] and therefore carry the
/// emitter's configured default level.
///
/// Blocks for the whole delivery, like every [`Emitter`] call. It may be
/// called from inside an async handler; see [`Emitter`] for how the HTTP
/// transport behaves on a runtime thread.
pub fn log_request(emitter: &Emitter, summary: &RequestSummary, error: Option<&str>) {
    let short_message = summary.short_message();
    let full_message = summary.full_message(error);
    let metadata = summary.metadata();

    match summary.severity() {
        Severity::Critical => emitter.critical(&short_message, &full_message, &metadata),
        Severity::Error => emitter.error(&short_message, &full_message, &metadata),
        Severity::Notice => emitter.notice(&short_message, &full_message, &metadata),
        _ => emitter.info(&short_message, &full_message, &metadata),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, KillSwitch};
    use crate::transport::MemoryTransport;

    fn summary(status: u16) -> RequestSummary {
        RequestSummary::new(
            status,
            "GET",
            "/orders/7",
            "10.0.0.7",
            Duration::from_micros(12_900),
        )
    }

    #[test]
    fn test_status_to_severity() {
        assert_eq!(summary(503).severity(), Severity::Critical);
        assert_eq!(summary(500).severity(), Severity::Critical);
        assert_eq!(summary(404).severity(), Severity::Error);
        assert_eq!(summary(400).severity(), Severity::Error);
        assert_eq!(summary(301).severity(), Severity::Notice);
        assert_eq!(summary(204).severity(), Severity::Info);
        assert_eq!(summary(101).severity(), Severity::Info);
    }

    #[test]
    fn test_messages() {
        let s = summary(404);
        assert_eq!(s.short_message(), "404 GET /orders/7 (10.0.0.7) 12");
        assert_eq!(s.full_message(None), s.short_message());
        assert_eq!(
            s.full_message(Some("not found")),
            "404 GET /orders/7 (10.0.0.7) 12\nnot found"
        );
    }

    #[test]
    fn test_metadata_fields() {
        let meta = summary(200).metadata();
        assert_eq!(meta.get("status"), Some(&FieldValue::Int(200)));
        assert_eq!(meta.get("ip"), Some(&FieldValue::from("10.0.0.7")));
        assert_eq!(meta.get("path"), Some(&FieldValue::from("/orders/7")));
        assert_eq!(meta.get("method"), Some(&FieldValue::from("GET")));
        assert_eq!(meta.get("response_time"), Some(&FieldValue::Int(12)));
    }

    #[test]
    fn test_log_request_emits_one_message() {
        let transport = MemoryTransport::new();
        let emitter = Emitter::builder("graylog", 12201, "shop")
            .default_level(Severity::Info)
            .kill_switch(KillSwitch::Fixed(false))
            .transport(transport.clone())
            .build()
            .unwrap();

        log_request(&emitter, &summary(502), Some("upstream timed out"));
        log_request(&emitter, &summary(200), None);

        let messages = transport.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["level"], 2);
        assert_eq!(messages[0]["_status"], 502);
        assert_eq!(
            messages[0]["full_message"],
            "502 GET /orders/7 (10.0.0.7) 12\nupstream timed out"
        );
        assert_eq!(messages[1]["level"], 6);
        assert_eq!(messages[1]["_path"], "/orders/7");
    }
}
