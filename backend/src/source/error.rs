//! Error types for snapshot fetching.

/// Result type for snapshot source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Error type for snapshot source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The endpoint answered with a non-success status.
    #[error("Endpoint returned HTTP {status} for {url}")]
    StatusError { status: u16, url: String },

    /// The body was not a valid snapshot.
    #[error("Failed to parse snapshot: {0}")]
    ParseError(String),

    /// Reading a snapshot file failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The source could not be built from its settings.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl SourceError {
    /// Whether a later attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::TransportError(_) => true,
            SourceError::StatusError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = SourceError::StatusError {
            status: 503,
            url: "http://localhost:5000/api/factory-data".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Endpoint returned HTTP 503 for http://localhost:5000/api/factory-data"
        );
        assert!(err.is_transient());
    }

    #[test]
    fn test_parse_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SourceError = serde_err.into();
        assert!(matches!(err, SourceError::ParseError(_)));
        assert!(!err.is_transient());
    }
}
