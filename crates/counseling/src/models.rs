//! Persisted records and request forms.
//!
//! Wire field names are camelCase and are normative: they are both the
//! JSON surface of the API and the document shape in the store. A reply
//! exists twice — as the canonical record in its own collection and as an
//! embedded snapshot inside its parent question's `replies` array — and
//! the two must stay value-equal after every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A patient's counseling question with its embedded reply thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque generated identifier.
    pub id: String,
    /// Identifier of the patient who created the question.
    pub patient_id: String,
    /// Short summary shown in listings.
    pub summary: String,
    /// Full question text.
    pub question: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub last_updated: DateTime<Utc>,
    /// Once true, `summary` and `question` are immutable.
    pub replied_to: bool,
    /// Embedded reply snapshots, in thread order.
    pub replies: Vec<Reply>,
}

/// A single reply in a question's thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    /// Opaque generated identifier.
    pub id: String,
    /// Identifier of the reply's author.
    pub user_id: String,
    /// Display name attached when the author is a doctor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    /// Reply text.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// True once a later reply in the thread supersedes this one, after
    /// which it becomes immutable.
    pub replied_to: bool,
}

/// A registered account. Created at registration, read at login, never
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque generated identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lower-cased email, unique across the collection.
    pub email: String,
    /// Account role.
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// bcrypt hash of the account password.
    pub password_hash: String,
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Medical professional; may reply to and delete any question.
    Doctor,
    /// Question author role assigned at registration.
    Patient,
}

/// Input for creating a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    /// Identifier of the authoring patient.
    pub patient_id: String,
    /// Short summary.
    pub summary: String,
    /// Full question text.
    pub question: String,
}

/// Input for editing a question's text fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionEdit {
    /// Replacement summary.
    pub summary: String,
    /// Replacement question text.
    pub question: String,
}

/// Input for replying to a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyDraft {
    /// Reply text.
    pub text: String,
}

/// Input for editing a reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyEdit {
    /// Replacement reply text.
    pub text: String,
}

/// Input for registering an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationForm {
    /// Display name.
    pub name: String,
    /// Email; lower-cased before storage and lookup.
    pub email: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
}

/// Input for logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    /// Email; lower-cased before lookup.
    pub email: String,
    /// Plain-text password to verify.
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Token minted by the identity collaborator.
    pub token: String,
    /// The authenticated account.
    pub user: User,
}
