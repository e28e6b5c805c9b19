pub mod github_source;
pub mod analysis_backend;
