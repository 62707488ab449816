//! Reply operations.
//!
//! A reply's canonical record lives in the reply collection; its embedded
//! copy inside the parent question is a denormalized read cache. Every
//! mutation here writes the canonical record first, then repairs the
//! embedded copies best effort — repair failures are logged, never
//! surfaced, and the canonical record is the source of truth while an
//! embedded copy transiently lags.

use chrono::Utc;
use serde_json::Value;

use crate::error::{ServiceError, ServiceResult};
use crate::identity::Actor;
use crate::ids::new_document_id;
use crate::models::{Reply, ReplyDraft, ReplyEdit};

use super::{CounselingService, DEFAULT_DOCTOR_LABEL, EMBEDDED_REPLY_ID_PATH};

impl CounselingService {
    /// Appends a reply to a question's thread.
    ///
    /// Requires an authenticated actor who is a doctor or the question's
    /// creator. Every prior reply in the thread is marked superseded, the
    /// question's `repliedTo` flag is raised, and its update timestamp
    /// refreshed. The reply record and the question are written
    /// sequentially without a transaction: if the reply write succeeds and
    /// the question write fails, the embedded copy is missing until an
    /// external retry. Known limitation.
    pub async fn reply_to_question(
        &self,
        actor: &Actor,
        question_id: &str,
        draft: ReplyDraft,
    ) -> ServiceResult<Reply> {
        let author_id = actor.authenticated_id()?.to_string();

        let mut question = self.questions().find_document(question_id).await?;
        if !actor.is_doctor() && !actor.is_creator(&question.patient_id) {
            return Err(ServiceError::Forbidden(
                "only doctors and the question creator can reply".to_string(),
            ));
        }

        let doctor_name = actor.is_doctor().then(|| {
            actor
                .display_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DOCTOR_LABEL.to_string())
        });

        let reply = Reply {
            id: new_document_id(),
            user_id: author_id,
            doctor_name,
            text: draft.text,
            created_at: Utc::now(),
            replied_to: false,
        };

        self.replies().create_document(&reply.id, &reply).await?;

        let superseded: Vec<String> = question.replies.iter().map(|r| r.id.clone()).collect();
        for prior in &mut question.replies {
            prior.replied_to = true;
        }
        question.replies.push(reply.clone());
        question.replied_to = true;
        question.last_updated = Utc::now();
        self.questions().update_document(question_id, &question).await?;

        // Keep the canonical records value-equal with their now-superseded
        // embedded copies. Best effort, logged on failure.
        for prior_id in superseded {
            self.mark_reply_superseded(&prior_id).await;
        }

        Ok(reply)
    }

    /// Returns a question's embedded reply thread.
    pub async fn list_replies(&self, question_id: &str) -> ServiceResult<Vec<Reply>> {
        Ok(self.questions().find_document(question_id).await?.replies)
    }

    /// Returns a reply's canonical record.
    pub async fn get_reply(&self, id: &str) -> ServiceResult<Reply> {
        Ok(self.replies().find_document(id).await?)
    }

    /// Replaces a reply's text.
    ///
    /// Only the author may edit, and only while the reply has not been
    /// superseded by a later reply. The canonical record is written first;
    /// every parent question embedding the reply is then repaired.
    pub async fn update_reply(&self, actor: &Actor, id: &str, edit: ReplyEdit) -> ServiceResult<Reply> {
        let mut existing = self.replies().find_document(id).await?;

        if !actor.is_creator(&existing.user_id) {
            return Err(ServiceError::Forbidden(
                "only the author can update this reply".to_string(),
            ));
        }
        if existing.replied_to {
            return Err(ServiceError::Forbidden(
                "reply has been superseded by a later reply".to_string(),
            ));
        }

        existing.text = edit.text;
        self.replies().update_document(id, &existing).await?;
        self.repair_embedded_copies(&existing).await;
        Ok(existing)
    }

    /// Deletes a reply's canonical record and filters it out of every
    /// parent question's embedded thread.
    ///
    /// Same authorization as [`CounselingService::update_reply`]. Parent
    /// rewrites are best effort.
    pub async fn delete_reply(&self, actor: &Actor, id: &str) -> ServiceResult<()> {
        let existing = self.replies().find_document(id).await?;

        if !actor.is_creator(&existing.user_id) {
            return Err(ServiceError::Forbidden(
                "only the author can delete this reply".to_string(),
            ));
        }
        if existing.replied_to {
            return Err(ServiceError::Forbidden(
                "reply has been superseded by a later reply".to_string(),
            ));
        }

        let parents = match self
            .questions()
            .find_documents_by_field(EMBEDDED_REPLY_ID_PATH, Value::String(id.to_string()))
            .await
        {
            Ok(parents) => parents,
            Err(err) => {
                tracing::warn!(reply_id = %id, error = %err, "failed to look up parent questions before reply deletion");
                Vec::new()
            }
        };

        self.replies().delete_document(id).await?;

        for mut parent in parents {
            parent.replies.retain(|r| r.id != id);
            if let Err(err) = self.questions().update_document(&parent.id, &parent).await {
                tracing::warn!(
                    question_id = %parent.id,
                    reply_id = %id,
                    error = %err,
                    "failed to remove embedded reply from parent question"
                );
            }
        }
        Ok(())
    }

    /// Rewrites the embedded copy of `reply` in every parent question.
    async fn repair_embedded_copies(&self, reply: &Reply) {
        let parents = match self
            .questions()
            .find_documents_by_field(EMBEDDED_REPLY_ID_PATH, Value::String(reply.id.clone()))
            .await
        {
            Ok(parents) => parents,
            Err(err) => {
                tracing::warn!(reply_id = %reply.id, error = %err, "failed to look up parent questions for embedded reply repair");
                return;
            }
        };

        for mut parent in parents {
            let Some(slot) = parent.replies.iter_mut().find(|r| r.id == reply.id) else {
                continue;
            };
            *slot = reply.clone();
            if let Err(err) = self.questions().update_document(&parent.id, &parent).await {
                tracing::warn!(
                    question_id = %parent.id,
                    reply_id = %reply.id,
                    error = %err,
                    "failed to repair embedded reply in parent question"
                );
            }
        }
    }

    /// Marks a canonical reply record superseded, best effort.
    async fn mark_reply_superseded(&self, reply_id: &str) {
        match self.replies().find_document(reply_id).await {
            Ok(mut prior) if !prior.replied_to => {
                prior.replied_to = true;
                if let Err(err) = self.replies().update_document(reply_id, &prior).await {
                    tracing::warn!(reply_id = %reply_id, error = %err, "failed to mark reply superseded");
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(reply_id = %reply_id, error = %err, "failed to load reply while marking superseded");
            }
        }
    }
}
