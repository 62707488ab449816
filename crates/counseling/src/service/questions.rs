//! Question operations.

use chrono::Utc;

use crate::error::{ServiceError, ServiceResult};
use crate::identity::Actor;
use crate::ids::new_document_id;
use crate::models::{Question, QuestionDraft, QuestionEdit};

use super::{CascadeOutcome, CounselingService};

impl CounselingService {
    /// Creates a question from a patient's draft.
    ///
    /// Stamps a fresh identifier and both timestamps, starts with
    /// `repliedTo = false` and an empty reply thread.
    pub async fn create_question(&self, draft: QuestionDraft) -> ServiceResult<Question> {
        let now = Utc::now();
        let question = Question {
            id: new_document_id(),
            patient_id: draft.patient_id,
            summary: draft.summary,
            question: draft.question,
            created_at: now,
            last_updated: now,
            replied_to: false,
            replies: Vec::new(),
        };
        self.questions().create_document(&question.id, &question).await?;
        Ok(question)
    }

    /// Returns every question.
    pub async fn list_questions(&self) -> ServiceResult<Vec<Question>> {
        Ok(self.questions().find_all_documents().await?)
    }

    /// Returns the question with the given identifier.
    pub async fn get_question(&self, id: &str) -> ServiceResult<Question> {
        Ok(self.questions().find_document(id).await?)
    }

    /// Replaces a question's text fields.
    ///
    /// Only the creator may edit, and only while the question has not been
    /// replied to; after the first reply the text fields are locked.
    pub async fn update_question(
        &self,
        actor: &Actor,
        id: &str,
        edit: QuestionEdit,
    ) -> ServiceResult<Question> {
        let mut existing = self.questions().find_document(id).await?;

        if !actor.is_creator(&existing.patient_id) {
            return Err(ServiceError::Forbidden(
                "only the creator can update this question".to_string(),
            ));
        }
        if existing.replied_to {
            return Err(ServiceError::Forbidden(
                "question has already been replied to".to_string(),
            ));
        }

        existing.summary = edit.summary;
        existing.question = edit.question;
        existing.last_updated = Utc::now();
        self.questions().update_document(id, &existing).await?;
        Ok(existing)
    }

    /// Deletes a question and, best effort, its replies' canonical records.
    ///
    /// Allowed for doctors and the creator. Every embedded reply's record
    /// deletion is attempted first; failures are logged and never abort
    /// the cascade — the question deletion always proceeds. The returned
    /// [`CascadeOutcome`] tells the caller whether reply cleanup fully
    /// succeeded.
    pub async fn delete_question(&self, actor: &Actor, id: &str) -> ServiceResult<CascadeOutcome> {
        let question = self.questions().find_document(id).await?;

        if !actor.is_doctor() && !actor.is_creator(&question.patient_id) {
            return Err(ServiceError::Forbidden(
                "only doctors and the question creator can delete this question".to_string(),
            ));
        }

        let mut cleanup_failed = false;
        for reply in &question.replies {
            if let Err(err) = self.replies().delete_document(&reply.id).await {
                tracing::warn!(
                    reply_id = %reply.id,
                    question_id = %id,
                    error = %err,
                    "failed to delete reply while deleting question"
                );
                cleanup_failed = true;
            }
        }

        self.questions().delete_document(id).await?;

        Ok(if cleanup_failed {
            CascadeOutcome::PartialReplyCleanup
        } else {
            CascadeOutcome::Complete
        })
    }
}
