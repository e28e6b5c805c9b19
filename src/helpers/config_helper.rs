use crate::config::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_BRANCH, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TIMEOUT_MINUTES,
    GITHUB_API_URL, GITHUB_TOKEN_ENV,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_github_api_url() -> String {
        GITHUB_API_URL.to_string()
    }

    pub fn default_branch() -> String {
        DEFAULT_BRANCH.to_string()
    }

    pub fn default_token_env() -> String {
        GITHUB_TOKEN_ENV.to_string()
    }

    pub fn default_backend_url() -> String {
        DEFAULT_BACKEND_URL.to_string()
    }

    pub fn default_detect_path() -> String {
        "/detect".to_string()
    }

    pub fn default_optimize_path() -> String {
        "/optimize".to_string()
    }

    pub fn default_convert_path() -> String {
        "/convert".to_string()
    }

    pub fn default_upgrade_path() -> String {
        "/upgrade".to_string()
    }

    pub fn default_deploy_path() -> String {
        "/deploy".to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn default_output_dir() -> String {
        "./codehack-results".to_string()
    }

    pub fn default_save_prompt() -> bool {
        true
    }

    pub fn default_diff_timeout_minutes() -> u64 {
        DEFAULT_TIMEOUT_MINUTES
    }

    pub fn default_open_browser() -> bool {
        true
    }

    pub fn default_context_lines() -> usize {
        3
    }
}
