//! Error types for the task store.

use thiserror::Error;

/// All error types that can occur in task store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or empty
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No task with this id exists
    #[error("Task not found: {0}")]
    NotFound(i64),

    /// SQLite error
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures of the backing store rather than of the caller's input.
    pub fn is_storage(&self) -> bool {
        matches!(self, StoreError::Storage(_) | StoreError::Io(_) | StoreError::Json(_))
    }
}

/// Result type alias for task store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = StoreError::Validation("name required".to_string());
        assert_eq!(err.to_string(), "Validation failed: name required");
        assert!(!err.is_storage());
    }

    #[test]
    fn test_not_found_error() {
        let err = StoreError::NotFound(7);
        assert_eq!(err.to_string(), "Task not found: 7");
        assert!(!err.is_storage());
    }

    #[test]
    fn test_storage_error_from_rusqlite() {
        let err: StoreError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(err.is_storage());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StoreError = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(err.is_storage());
    }
}
