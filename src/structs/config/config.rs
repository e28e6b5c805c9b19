use serde::{Deserialize, Serialize};
use crate::structs::config::backend_config::BackendConfig;
use crate::structs::config::github_config::GithubConfig;
use crate::structs::config::output_config::OutputConfig;
use crate::structs::config::ui_config::UiConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub ui: UiConfig,
}
