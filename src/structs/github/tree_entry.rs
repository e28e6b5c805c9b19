use serde::{Deserialize, Serialize};
use crate::enums::tree_entry_kind::TreeEntryKind;

/// One node of a repository's recursive file listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: TreeEntryKind,
    #[serde(default)]
    pub url: String,
    pub mode: String,
    pub sha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == TreeEntryKind::Blob
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Nesting level, used to indent the listing.
    pub fn depth(&self) -> usize {
        self.path.matches('/').count()
    }
}
