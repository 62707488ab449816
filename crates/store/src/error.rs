//! Error types for the document store layer.
//!
//! Every backend maps its native failures into [`StoreError`] exactly once,
//! so callers can rely on a single taxonomy: absent target, duplicate
//! identifier, exceeded deadline, or an opaque backend fault.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all document store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with the requested identifier exists.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// A document with the given identifier already exists.
    #[error("document already exists: {collection}/{id}")]
    Conflict { collection: String, id: String },

    /// The per-call deadline elapsed before the operation completed.
    ///
    /// Distinguishable from [`StoreError::NotFound`] and
    /// [`StoreError::Conflict`]; a timed-out write may or may not have been
    /// applied by the store.
    #[error("operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Establishing the shared connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// A document could not be encoded or decoded.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Any other failure reported by the backing store.
    #[error("backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Returns `true` for the absent-target case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns `true` for the duplicate-identifier case.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = StoreError::NotFound {
            collection: "questions".to_string(),
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "document not found: questions/abc");
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn conflict_display() {
        let err = StoreError::Conflict {
            collection: "users".to_string(),
            id: "u1".to_string(),
        };
        assert_eq!(err.to_string(), "document already exists: users/u1");
        assert!(err.is_conflict());
    }

    #[test]
    fn timeout_is_not_not_found() {
        let err = StoreError::Timeout { timeout_ms: 10_000 };
        assert!(!err.is_not_found());
        assert!(!err.is_conflict());
        assert!(err.to_string().contains("10000ms"));
    }

    #[test]
    fn serde_error_maps_to_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Serialization { .. }));
    }
}
