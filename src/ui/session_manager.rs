use std::sync::Arc;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;
use crate::enums::session_status::SessionStatus;
use crate::structs::diff::diff_session::DiffSession;
use crate::structs::issue::Issue;

#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<DashMap<String, DiffSession>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_session(&self, file_path: &str, language: &str, original: &str, optimized: &str, issues: Vec<Issue>) -> String {
        let session_id = Uuid::new_v4().to_string();

        let session = DiffSession {
            id: session_id.clone(),
            file_path: file_path.to_string(),
            language: language.to_string(),
            original_content: original.to_string(),
            optimized_content: optimized.to_string(),
            issues,
            status: SessionStatus::Active,
            created_at: Utc::now(),
        };

        self.sessions.insert(session_id.clone(), session);
        session_id
    }

    pub fn get_session(&self, session_id: &str) -> Option<DiffSession> {
        self.sessions.get(session_id).map(|entry| entry.clone())
    }

    /// Marks an active session applied. Returns false when it is unknown or
    /// already decided.
    pub fn apply_session(&self, session_id: &str) -> bool {
        self.decide(session_id, SessionStatus::Applied)
    }

    pub fn cancel_session(&self, session_id: &str) -> bool {
        self.decide(session_id, SessionStatus::Cancelled)
    }

    pub fn cleanup_expired_sessions(&self, max_age: Duration) {
        let cutoff = Utc::now() - max_age;
        self.sessions.retain(|_, session| {
            session.status == SessionStatus::Active && session.created_at > cutoff
        });
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn decide(&self, session_id: &str, status: SessionStatus) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut session) if session.status == SessionStatus::Active => {
                session.status = status;
                true
            }
            _ => false,
        }
    }
}
