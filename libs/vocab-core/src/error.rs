//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors that can occur when replacing the sentence bank in bulk.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("top-level JSON must be an array, found {found}")]
    NotASequence { found: &'static str },

    #[error("entry {index} is not a sentence record: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_a_sequence() {
        let error = ValidationError::NotASequence { found: "object" };
        assert_eq!(
            error.to_string(),
            "top-level JSON must be an array, found object"
        );
    }

    #[test]
    fn test_error_display_invalid_entry() {
        let error = ValidationError::InvalidEntry {
            index: 2,
            reason: "expected a string".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "entry 2 is not a sentence record: expected a string"
        );
    }
}
