use serde::{Deserialize, Serialize};
use crate::structs::issue::Issue;

#[derive(Debug, Deserialize)]
pub struct DetectResponse {
    pub issues: Option<Vec<Issue>>,
}

#[derive(Debug, Deserialize)]
pub struct CodeResponse {
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResult {
    pub code: String,
    #[serde(default)]
    pub language_specific_notes: Vec<String>,
    #[serde(default)]
    pub potential_compatibility_issues: Vec<String>,
}
