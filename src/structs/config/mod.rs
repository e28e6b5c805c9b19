pub mod config;
pub mod github_config;
pub mod backend_config;
pub mod output_config;
pub mod ui_config;
