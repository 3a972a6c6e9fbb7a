//! Error types for the GELF emitter

pub type Result<T> = std::result::Result<T, GelfError>;

#[derive(Debug, thiserror::Error)]
pub enum GelfError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The message could not be encoded as JSON
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network or protocol failure while posting a message
    #[error("Delivery to '{url}' failed: {message}")]
    Delivery { url: String, message: String },

    /// Transport backend error (generic)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl GelfError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        GelfError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a delivery error for the given endpoint
    pub fn delivery(url: impl Into<String>, message: impl Into<String>) -> Self {
        GelfError::Delivery {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a transport error (generic)
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        GelfError::Transport(msg.into())
    }

    /// Whether this error aborts emitter construction
    pub fn is_configuration(&self) -> bool {
        matches!(self, GelfError::InvalidConfiguration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = GelfError::config("GELF_LOG_LEVEL", "not an integer");
        assert!(matches!(err, GelfError::InvalidConfiguration { .. }));
        assert!(err.is_configuration());

        let err = GelfError::delivery("http://localhost:12201/gelf", "connection refused");
        assert!(matches!(err, GelfError::Delivery { .. }));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_display() {
        let err = GelfError::config("GELF_LOG_LEVEL", "'abc' is not an integer");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for GELF_LOG_LEVEL: 'abc' is not an integer"
        );

        let err = GelfError::delivery("http://graylog:12201/gelf", "timed out");
        assert_eq!(
            err.to_string(),
            "Delivery to 'http://graylog:12201/gelf' failed: timed out"
        );

        let err = GelfError::transport("stream closed");
        assert_eq!(err.to_string(), "Transport error: stream closed");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GelfError = json_err.into();
        assert!(matches!(err, GelfError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization failed"));
    }
}
