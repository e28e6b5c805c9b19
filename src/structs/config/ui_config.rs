use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UiConfig {
    #[serde(default = "ConfigHelper::default_diff_timeout_minutes")]
    pub diff_timeout_minutes: u64,

    #[serde(default = "ConfigHelper::default_open_browser")]
    pub open_browser: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            diff_timeout_minutes: ConfigHelper::default_diff_timeout_minutes(),
            open_browser: ConfigHelper::default_open_browser(),
        }
    }
}
