use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GithubConfig {
    #[serde(default = "ConfigHelper::default_github_api_url")]
    pub api_url: String,

    #[serde(default = "ConfigHelper::default_branch")]
    pub branch: String,

    /// Name of the environment variable holding an optional access token.
    #[serde(default = "ConfigHelper::default_token_env")]
    pub token_env: String,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: ConfigHelper::default_github_api_url(),
            branch: ConfigHelper::default_branch(),
            token_env: ConfigHelper::default_token_env(),
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
        }
    }
}

impl GithubConfig {
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|token| !token.trim().is_empty())
    }
}
