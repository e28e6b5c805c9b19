use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "ConfigHelper::default_backend_url")]
    pub base_url: String,

    #[serde(default = "ConfigHelper::default_detect_path")]
    pub detect_path: String,

    #[serde(default = "ConfigHelper::default_optimize_path")]
    pub optimize_path: String,

    #[serde(default = "ConfigHelper::default_convert_path")]
    pub convert_path: String,

    #[serde(default = "ConfigHelper::default_upgrade_path")]
    pub upgrade_path: String,

    #[serde(default = "ConfigHelper::default_deploy_path")]
    pub deploy_path: String,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: ConfigHelper::default_backend_url(),
            detect_path: ConfigHelper::default_detect_path(),
            optimize_path: ConfigHelper::default_optimize_path(),
            convert_path: ConfigHelper::default_convert_path(),
            upgrade_path: ConfigHelper::default_upgrade_path(),
            deploy_path: ConfigHelper::default_deploy_path(),
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
        }
    }
}
