//! Error taxonomy for the domain layer.
//!
//! Store errors are mapped into [`ServiceError`] exactly once, at the
//! repository boundary; orchestration never re-interprets a mapped error.
//!
//! # Transport Mapping
//!
//! | Variant | Status |
//! |---------|--------|
//! | BadRequest | 400 |
//! | Unauthorized | 401 |
//! | Forbidden | 403 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Internal | 500 |

use counseling_store::StoreError;
use thiserror::Error;

/// The primary error type for counseling and auth operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid actor identity.
    #[error("user not authenticated")]
    Unauthorized,

    /// An authorization rule failed: wrong owner, wrong role, or the
    /// target is already superseded.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The target identifier is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// A duplicate identifier or unique-field collision on create.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Store connectivity, timeout, or encoding failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Transport-independent status category for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Unauthorized => 401,
            ServiceError::Forbidden(_) => 403,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Internal(_) => 500,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => {
                ServiceError::NotFound(format!("{collection}/{id}"))
            }
            StoreError::Conflict { collection, id } => {
                ServiceError::Conflict(format!("{collection}/{id} already exists"))
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for domain operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_cover_the_taxonomy() {
        assert_eq!(ServiceError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(ServiceError::Unauthorized.status_code(), 401);
        assert_eq!(ServiceError::Forbidden("x".into()).status_code(), 403);
        assert_eq!(ServiceError::NotFound("x".into()).status_code(), 404);
        assert_eq!(ServiceError::Conflict("x".into()).status_code(), 409);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn store_not_found_maps_to_not_found() {
        let err: ServiceError = StoreError::NotFound {
            collection: "questions".to_string(),
            id: "q1".to_string(),
        }
        .into();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn store_conflict_maps_to_conflict() {
        let err: ServiceError = StoreError::Conflict {
            collection: "users".to_string(),
            id: "u1".to_string(),
        }
        .into();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn store_timeout_maps_to_internal() {
        let err: ServiceError = StoreError::Timeout { timeout_ms: 10_000 }.into();
        assert!(matches!(err, ServiceError::Internal(_)));
        assert_eq!(err.status_code(), 500);
    }
}
