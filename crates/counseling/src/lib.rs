//! Counseling Service Core
//!
//! Domain layer for a medical question/reply counseling service: patients
//! post questions, doctors or the original author reply, and a thin auth
//! layer registers users and verifies logins. Persistence goes through the
//! generic document store in `counseling-store`, instantiated once per
//! entity type.
//!
//! # Architecture
//!
//! - [`models`] - Persisted records (Question, Reply, User) and request forms
//! - [`identity`] - The [`Actor`] claims the orchestration consults
//! - [`service`] - Question/reply workflows and their authorization rules
//! - [`auth`] - Registration and login
//! - [`error`] - The [`ServiceError`] taxonomy with transport-independent
//!   status categories
//!
//! # Consistency Model
//!
//! A reply is stored twice: canonically in the reply collection and as an
//! embedded snapshot inside its parent question. The orchestration layer
//! is the sole writer of that duplication invariant. Multi-collection
//! workflows are sequential network calls without a transaction; secondary
//! effects (cascade deletes, embedded-copy repair) are best effort with
//! logged failures, and the inconsistency windows this opens are accepted
//! and documented on the operations that create them.

#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod identity;
pub mod ids;
pub mod models;
pub mod service;

pub use auth::{AuthService, TokenIssuer};
pub use error::{ServiceError, ServiceResult};
pub use identity::Actor;
pub use models::{
    LoginForm, LoginResponse, Question, QuestionDraft, QuestionEdit, RegistrationForm, Reply,
    ReplyDraft, ReplyEdit, User, UserType,
};
pub use service::{CascadeOutcome, CounselingService};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
