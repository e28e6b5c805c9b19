pub mod tree_entry;
pub mod git_tree;
pub mod repo_ref;
pub mod blob_ref;
