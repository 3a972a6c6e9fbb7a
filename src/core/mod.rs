//! Core emitter types

pub mod config;
pub mod emitter;
pub mod error;
pub mod field_value;
pub mod message;
pub mod metrics;
pub mod severity;

pub use config::{EmitterConfig, KillSwitch, DISABLED_ENV, GELF_VERSION, LOG_LEVEL_ENV};
pub use emitter::{report_to_stderr, Emitter, EmitterBuilder, ErrorHandler};
pub use error::{GelfError, Result};
pub use field_value::{FieldValue, Metadata};
pub use message::{build_message, LogMessage};
pub use metrics::EmitterMetrics;
pub use severity::Severity;
