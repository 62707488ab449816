//! Shared fixtures for the service-layer test suites.
#![allow(dead_code)]

use std::sync::Arc;

use counseling_core::{
    Actor, AuthService, CounselingService, Question, QuestionDraft, Reply, ReplyDraft,
    ServiceResult, TokenIssuer, User,
};
use counseling_store::MemoryStore;

/// Service under test plus direct handles on its backing stores.
pub struct Harness {
    pub questions: Arc<MemoryStore<Question>>,
    pub replies: Arc<MemoryStore<Reply>>,
    pub service: CounselingService,
}

pub fn harness() -> Harness {
    let questions = Arc::new(MemoryStore::new("questions"));
    let replies = Arc::new(MemoryStore::new("replies"));
    let service = CounselingService::new(questions.clone(), replies.clone());
    Harness {
        questions,
        replies,
        service,
    }
}

pub fn auth_harness() -> (Arc<MemoryStore<User>>, AuthService) {
    let users = Arc::new(MemoryStore::new("users"));
    let service = AuthService::new(users.clone());
    (users, service)
}

pub fn doctor(id: &str) -> Actor {
    Actor::doctor(id, Some(format!("Dr. {id}")))
}

pub fn unnamed_doctor(id: &str) -> Actor {
    Actor::doctor(id, None)
}

pub fn patient(id: &str) -> Actor {
    Actor::patient(id)
}

pub fn draft(patient_id: &str) -> QuestionDraft {
    QuestionDraft {
        patient_id: patient_id.to_string(),
        summary: "headache".to_string(),
        question: "It has lasted three days, what should I do?".to_string(),
    }
}

pub fn reply_draft(text: &str) -> ReplyDraft {
    ReplyDraft {
        text: text.to_string(),
    }
}

/// Issuer that mints a predictable token per user.
pub struct StaticIssuer;

impl TokenIssuer for StaticIssuer {
    fn issue(&self, user: &User) -> ServiceResult<String> {
        Ok(format!("token-for-{}", user.id))
    }
}
