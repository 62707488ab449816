//! Question workflow tests: creation, the lock-after-reply rule, and the
//! best-effort delete cascade.

mod common;

use std::collections::HashSet;

use counseling_core::{CascadeOutcome, QuestionEdit, ServiceError};
use counseling_store::DocumentStore;

use common::{doctor, draft, harness, patient, reply_draft};

#[tokio::test]
async fn create_question_stamps_fresh_state() {
    let h = harness();

    let question = h.service.create_question(draft("p1")).await.expect("create");

    assert_eq!(question.id.len(), 32);
    assert!(question.id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(question.patient_id, "p1");
    assert!(!question.replied_to);
    assert!(question.replies.is_empty());
    assert_eq!(question.created_at, question.last_updated);

    // Persisted verbatim.
    let stored = h.questions.find_document(&question.id).await.unwrap();
    assert_eq!(stored, question);
}

#[tokio::test]
async fn question_ids_are_unique_across_creates() {
    let h = harness();
    let mut seen = HashSet::new();
    for _ in 0..50 {
        let question = h.service.create_question(draft("p1")).await.unwrap();
        assert!(seen.insert(question.id), "duplicate question id");
    }
}

#[tokio::test]
async fn list_and_get_round_trip() {
    let h = harness();
    let created = h.service.create_question(draft("p1")).await.unwrap();
    h.service.create_question(draft("p2")).await.unwrap();

    let all = h.service.list_questions().await.unwrap();
    assert_eq!(all.len(), 2);

    let fetched = h.service.get_question(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_missing_question_is_not_found() {
    let h = harness();
    let err = h.service.get_question("missing").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn owner_can_update_before_first_reply() {
    let h = harness();
    let question = h.service.create_question(draft("p1")).await.unwrap();

    let updated = h
        .service
        .update_question(
            &patient("p1"),
            &question.id,
            QuestionEdit {
                summary: "migraine".to_string(),
                question: "Updated text".to_string(),
            },
        )
        .await
        .expect("owner update should succeed");

    assert_eq!(updated.summary, "migraine");
    assert_eq!(updated.question, "Updated text");
    assert!(updated.last_updated >= updated.created_at);
    // Only text fields and the timestamp changed.
    assert_eq!(updated.patient_id, "p1");
    assert!(!updated.replied_to);
}

#[tokio::test]
async fn non_owner_update_is_forbidden() {
    let h = harness();
    let question = h.service.create_question(draft("p1")).await.unwrap();

    let err = h
        .service
        .update_question(
            &patient("p2"),
            &question.id,
            QuestionEdit {
                summary: "x".to_string(),
                question: "y".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Forbidden(_)));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn update_after_reply_is_forbidden_and_text_unchanged() {
    let h = harness();
    let question = h.service.create_question(draft("p1")).await.unwrap();
    h.service
        .reply_to_question(&doctor("d1"), &question.id, reply_draft("rest well"))
        .await
        .unwrap();

    let err = h
        .service
        .update_question(
            &patient("p1"),
            &question.id,
            QuestionEdit {
                summary: "changed".to_string(),
                question: "changed".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let stored = h.service.get_question(&question.id).await.unwrap();
    assert_eq!(stored.summary, question.summary);
    assert_eq!(stored.question, question.question);
}

#[tokio::test]
async fn delete_by_owner_removes_question() {
    let h = harness();
    let question = h.service.create_question(draft("p1")).await.unwrap();

    let outcome = h
        .service
        .delete_question(&patient("p1"), &question.id)
        .await
        .unwrap();

    assert_eq!(outcome, CascadeOutcome::Complete);
    assert!(h.service.get_question(&question.id).await.is_err());
}

#[tokio::test]
async fn delete_by_stranger_is_forbidden() {
    let h = harness();
    let question = h.service.create_question(draft("p1")).await.unwrap();

    let err = h
        .service
        .delete_question(&patient("p2"), &question.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    assert!(h.service.get_question(&question.id).await.is_ok());
}

#[tokio::test]
async fn delete_cascades_to_canonical_reply_records() {
    let h = harness();
    let question = h.service.create_question(draft("p1")).await.unwrap();
    let r1 = h
        .service
        .reply_to_question(&doctor("d1"), &question.id, reply_draft("first"))
        .await
        .unwrap();
    let r2 = h
        .service
        .reply_to_question(&patient("p1"), &question.id, reply_draft("second"))
        .await
        .unwrap();

    let outcome = h
        .service
        .delete_question(&doctor("d1"), &question.id)
        .await
        .unwrap();

    assert_eq!(outcome, CascadeOutcome::Complete);
    assert!(h.replies.find_document(&r1.id).await.is_err());
    assert!(h.replies.find_document(&r2.id).await.is_err());
    assert!(h.questions.find_document(&question.id).await.is_err());
}

#[tokio::test]
async fn failed_reply_cleanup_does_not_abort_question_delete() {
    let h = harness();
    let question = h.service.create_question(draft("p1")).await.unwrap();
    let r1 = h
        .service
        .reply_to_question(&doctor("d1"), &question.id, reply_draft("first"))
        .await
        .unwrap();
    let r2 = h
        .service
        .reply_to_question(&patient("p1"), &question.id, reply_draft("second"))
        .await
        .unwrap();

    h.replies.fail_delete_of(&r1.id);

    let outcome = h
        .service
        .delete_question(&doctor("d1"), &question.id)
        .await
        .expect("question delete must still succeed");

    // The caller is told cleanup was partial; r2's deletion was still
    // attempted and the question is gone.
    assert_eq!(outcome, CascadeOutcome::PartialReplyCleanup);
    assert!(h.replies.find_document(&r1.id).await.is_ok());
    assert!(h.replies.find_document(&r2.id).await.is_err());
    assert!(h.questions.find_document(&question.id).await.is_err());
}
