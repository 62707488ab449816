//! Registration and login over the user collection.
//!
//! Token issuance belongs to the identity collaborator; the auth service
//! verifies credentials and delegates minting through [`TokenIssuer`].

use std::sync::Arc;

use bcrypt::{DEFAULT_COST, hash, verify};
use counseling_store::DocumentStore;
use serde_json::Value;

use crate::error::{ServiceError, ServiceResult};
use crate::ids::new_document_id;
use crate::models::{LoginForm, LoginResponse, RegistrationForm, User, UserType};

/// Field used for unique-email lookup in the user collection.
pub const EMAIL_FIELD: &str = "email";

/// Token minting capability supplied by the identity collaborator.
pub trait TokenIssuer: Send + Sync {
    /// Issues a token for the authenticated user.
    fn issue(&self, user: &User) -> ServiceResult<String>;
}

/// Registration and login on top of the user store.
pub struct AuthService {
    users: Arc<dyn DocumentStore<User>>,
}

impl AuthService {
    /// Creates the service over the user store.
    pub fn new(users: Arc<dyn DocumentStore<User>>) -> Self {
        Self { users }
    }

    /// Registers a new patient account.
    ///
    /// The email is lower-cased before the uniqueness check and storage;
    /// a duplicate yields `Conflict`. The password is bcrypt-hashed and
    /// never stored in the clear.
    pub async fn register(&self, form: RegistrationForm) -> ServiceResult<User> {
        let email = form.email.to_lowercase();

        let existing = self
            .users
            .find_documents_by_field(EMAIL_FIELD, Value::String(email.clone()))
            .await?;
        if !existing.is_empty() {
            return Err(ServiceError::Conflict(
                "a user with this email already exists".to_string(),
            ));
        }

        let password_hash = hash(&form.password, DEFAULT_COST)
            .map_err(|err| ServiceError::Internal(format!("password hashing failed: {err}")))?;

        let user = User {
            id: new_document_id(),
            name: form.name,
            email,
            user_type: UserType::Patient,
            password_hash,
        };
        self.users.create_document(&user.id, &user).await?;
        Ok(user)
    }

    /// Verifies credentials and returns a token plus the account.
    ///
    /// An unknown email and a failed password check are indistinguishable
    /// to the caller: both are `Unauthorized`.
    pub async fn login(
        &self,
        form: LoginForm,
        issuer: &dyn TokenIssuer,
    ) -> ServiceResult<LoginResponse> {
        let email = form.email.to_lowercase();

        let users = self
            .users
            .find_documents_by_field(EMAIL_FIELD, Value::String(email))
            .await?;
        let Some(user) = users.into_iter().next() else {
            return Err(ServiceError::Unauthorized);
        };

        let valid = verify(&form.password, &user.password_hash)
            .map_err(|err| ServiceError::Internal(format!("password verification failed: {err}")))?;
        if !valid {
            return Err(ServiceError::Unauthorized);
        }

        let token = issuer.issue(&user)?;
        Ok(LoginResponse { token, user })
    }
}
