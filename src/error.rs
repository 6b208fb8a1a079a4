// Error types for issuestore

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes surfaced by the store and its storage backends
#[derive(Error, Debug)]
pub enum Error {
    /// Stored blob is not a valid JSON array of issues
    #[error("corrupt issue data: {reason}")]
    CorruptData { reason: String },

    /// Storage rejected a write for lack of capacity
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// I/O errors from a file-backed storage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_data_display() {
        let err = Error::CorruptData {
            reason: "expected array".to_string(),
        };
        assert_eq!(err.to_string(), "corrupt issue data: expected array");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
