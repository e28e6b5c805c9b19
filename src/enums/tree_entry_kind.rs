use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryKind {
    Blob,
    Tree,
    /// Submodule entries; listed but never opened.
    Commit,
}

impl TreeEntryKind {
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Blob => "📄",
            Self::Tree => "📁",
            Self::Commit => "🔗",
        }
    }
}
