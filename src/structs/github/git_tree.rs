use serde::Deserialize;
use crate::structs::github::tree_entry::TreeEntry;

#[derive(Debug, Deserialize)]
pub struct GitTree {
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub truncated: bool,
    /// Absent in error payloads; its absence is treated as a fetch failure.
    pub tree: Option<Vec<TreeEntry>>,
}
