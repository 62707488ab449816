//! Counseling orchestration.
//!
//! Composes the question and reply stores behind the externally-exposed
//! operations and owns every authorization decision. Multi-step workflows
//! (reply creation touching two collections, delete cascades, embedded-copy
//! repair) are sequential network calls without a transaction; the
//! secondary effects are best effort and their failures are logged, per
//! the partial-failure policies documented on each operation.

mod questions;
mod replies;

use std::sync::Arc;

use counseling_store::DocumentStore;

use crate::models::{Question, Reply};

/// Dotted field path locating a reply's embedded copy inside its parent
/// question.
pub const EMBEDDED_REPLY_ID_PATH: &str = "replies.id";

/// Display name attached to doctor replies when the identity layer
/// supplies none.
pub const DEFAULT_DOCTOR_LABEL: &str = "Doctor";

/// Question/reply workflow orchestration over the two stores.
pub struct CounselingService {
    questions: Arc<dyn DocumentStore<Question>>,
    replies: Arc<dyn DocumentStore<Reply>>,
}

impl CounselingService {
    /// Creates the service over the question and reply stores.
    pub fn new(
        questions: Arc<dyn DocumentStore<Question>>,
        replies: Arc<dyn DocumentStore<Reply>>,
    ) -> Self {
        Self { questions, replies }
    }

    pub(crate) fn questions(&self) -> &dyn DocumentStore<Question> {
        self.questions.as_ref()
    }

    pub(crate) fn replies(&self) -> &dyn DocumentStore<Reply> {
        self.replies.as_ref()
    }
}

/// Outcome of a question deletion's best-effort reply cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// The question and every canonical reply record were removed.
    Complete,
    /// The question was removed but at least one reply record could not
    /// be deleted; the failures were logged.
    PartialReplyCleanup,
}
