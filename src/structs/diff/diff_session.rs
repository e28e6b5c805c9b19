use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::session_status::SessionStatus;
use crate::structs::issue::Issue;

/// One original-vs-optimized comparison served by the diff viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffSession {
    pub id: String,
    pub file_path: String,
    pub language: String,
    pub original_content: String,
    pub optimized_content: String,
    pub issues: Vec<Issue>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}
