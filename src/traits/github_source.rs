use async_trait::async_trait;
use crate::errors::CodeHackResult;
use crate::structs::github::blob_ref::BlobRef;
use crate::structs::github::repo_ref::RepoRef;
use crate::structs::github::tree_entry::TreeEntry;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubSource: Send + Sync {
    /// Recursive listing of the configured branch.
    async fn fetch_tree(&self, repo: &RepoRef) -> CodeHackResult<Vec<TreeEntry>>;

    /// Raw text of one file.
    async fn fetch_file_content(&self, blob: &BlobRef) -> CodeHackResult<String>;
}
