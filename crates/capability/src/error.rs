use std::time::Duration;

use thiserror::Error;

/// Errors from external capability calls (fetch, parse, index, generate,
/// synthesize, store).
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The requested resource does not exist (missing file, 404 source).
    #[error("not found: {0}")]
    NotFound(String),

    /// The capability ran but the operation failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The call did not complete within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The payload was structurally unusable: a corrupt PDF, an empty
    /// synthesis result, a document with no extractable text.
    #[error("content error: {0}")]
    Content(String),

    /// The capability was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CapabilityError {
    /// Returns `true` if the error is transient and the operation may
    /// succeed on a queue-level redelivery. Pipelines treat both classes
    /// identically (terminal FAILED status); the distinction only shapes
    /// the log line.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(CapabilityError::Timeout(Duration::from_secs(5)).is_retryable());
        assert!(CapabilityError::Connection("reset".into()).is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!CapabilityError::NotFound("x".into()).is_retryable());
        assert!(!CapabilityError::Content("empty pdf".into()).is_retryable());
        assert!(!CapabilityError::ExecutionFailed("x".into()).is_retryable());
        assert!(!CapabilityError::Configuration("x".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = CapabilityError::Content("no text extracted".into());
        assert_eq!(err.to_string(), "content error: no text extracted");
    }
}
