//! # GELF Emitter
//!
//! Formats application events as GELF (Graylog Extended Log Format) messages
//! and posts them to a Graylog HTTP input.
//!
//! ## Features
//!
//! - **Fire and Forget**: Logging never fails the operation it instruments
//! - **Kill Switch**: `GELF_DISABLED` silences delivery without a redeploy
//! - **Typed Metadata**: Additional fields are a closed set of JSON-ready values
//! - **Thread Safe**: One emitter, shared by reference, no locking on the hot path

pub mod core;
pub mod macros;
pub mod request_log;
pub mod transport;

pub mod prelude {
    #[cfg(feature = "http")]
    pub use crate::transport::HttpTransport;
    pub use crate::transport::{MemoryTransport, Transport};
    pub use crate::core::{
        Emitter, EmitterBuilder, EmitterConfig, EmitterMetrics, ErrorHandler, FieldValue,
        GelfError, KillSwitch, LogMessage, Metadata, Result, Severity,
    };
    pub use crate::request_log::{log_request, RequestSummary};
}

pub use crate::core::{
    build_message, report_to_stderr, Emitter, EmitterBuilder, EmitterConfig, EmitterMetrics,
    ErrorHandler, FieldValue, GelfError, KillSwitch, LogMessage, Metadata, Result, Severity,
    DISABLED_ENV, GELF_VERSION, LOG_LEVEL_ENV,
};
pub use request_log::{log_request, RequestSummary};
pub use transport::{Delivery, MemoryTransport, Transport};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
