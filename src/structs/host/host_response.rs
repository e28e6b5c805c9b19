use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostResponse {
    pub command: String,
    pub panel: String,
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub language_specific_notes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub potential_compatibility_issues: Vec<String>,
}
