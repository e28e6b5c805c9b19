use serde::{Deserialize, Serialize};
use crate::structs::github::repo_ref::RepoRef;

/// A file inside a repository, resolved from a tree entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    pub repo: RepoRef,
    pub path: String,
}
