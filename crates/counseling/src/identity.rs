//! Actor identity facts consulted by the orchestration layer.
//!
//! The identity collaborator (token validation, claim extraction) is out
//! of scope; it hands the core an [`Actor`] and the core asks it exactly
//! two boolean questions — is this a doctor, and is this the creator of a
//! given record.

use crate::error::{ServiceError, ServiceResult};
use crate::models::UserType;

/// Claims extracted from the inbound request context. Any field may be
/// absent when the request carried no (valid) identity.
#[derive(Debug, Clone, Default)]
pub struct Actor {
    /// Authenticated user identifier.
    pub user_id: Option<String>,
    /// Authenticated role.
    pub user_type: Option<UserType>,
    /// Display name, when the identity layer supplies one.
    pub display_name: Option<String>,
}

impl Actor {
    /// An actor with no identity at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A doctor actor, optionally with a display name.
    pub fn doctor(user_id: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            user_type: Some(UserType::Doctor),
            display_name,
        }
    }

    /// A patient actor.
    pub fn patient(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            user_type: Some(UserType::Patient),
            display_name: None,
        }
    }

    /// Whether the actor carries the doctor role.
    pub fn is_doctor(&self) -> bool {
        matches!(self.user_type, Some(UserType::Doctor))
    }

    /// Whether the actor is the creator identified by `owner_id`.
    pub fn is_creator(&self, owner_id: &str) -> bool {
        self.user_id.as_deref() == Some(owner_id)
    }

    /// The actor's identifier, or [`ServiceError::Unauthorized`] when the
    /// request carried none.
    pub fn authenticated_id(&self) -> ServiceResult<&str> {
        self.user_id.as_deref().ok_or(ServiceError::Unauthorized)
    }
}
