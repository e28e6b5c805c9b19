use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{BACKEND_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::{CodeHackError, CodeHackResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

const SAMPLE_CONFIG: &str = r#"# CodeHack Configuration

# GitHub REST API access
[github]
api_url = "https://api.github.com"
# Branch whose tree is listed
branch = "main"
# Environment variable holding an optional access token
token_env = "GITHUB_TOKEN"
request_timeout_secs = 120

# Code analysis backend
[backend]
base_url = "http://127.0.0.1:8000"
detect_path = "/detect"
optimize_path = "/optimize"
convert_path = "/convert"
upgrade_path = "/upgrade"
deploy_path = "/deploy"
request_timeout_secs = 120

# Output Configuration
[output]
# Directory to store applied buffers
output_dir = "./codehack-results"
ask_to_save = true
# Lines of context shown around an issue
context_lines = 3

# Diff viewer
[ui]
diff_timeout_minutes = 30
open_browser = true
"#;

impl ConfigManager {

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    pub fn load() -> CodeHackResult<Config> {
        let mut config = Self::load_from(&Self::config_path())?;
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Loads the file at `path`, falling back to defaults when it is absent.
    pub fn load_from(path: &Path) -> CodeHackResult<Config> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        log::info!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| CodeHackError::config_file_error(&path.display().to_string(), &e.to_string()))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CodeHackError::config_file_error(&path.display().to_string(), e.message()))?;
        Ok(config)
    }

    pub fn apply_env_overrides(config: &mut Config) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("Backend URL overridden by {}", BACKEND_URL_ENV);
                config.backend.base_url = url.trim().to_string();
            }
        }
    }

    pub fn create_sample_config() -> CodeHackResult<PathBuf> {
        let config_file_path = Self::config_path();
        Self::create_sample_config_at(&config_file_path)?;
        Ok(config_file_path)
    }

    pub fn create_sample_config_at(config_file_path: &Path) -> CodeHackResult<()> {
        if config_file_path.exists() {
            return Err(CodeHackError::config_file_error(
                &config_file_path.display().to_string(),
                "file already exists",
            ));
        }

        if let Some(dir) = config_file_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(config_file_path, SAMPLE_CONFIG)?;
        log::info!("✅ Created sample config at: {}", config_file_path.display());
        Ok(())
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (field, value) in [("github.api_url", &config.github.api_url), ("backend.base_url", &config.backend.base_url)] {
            if reqwest::Url::parse(value).is_err() {
                errors.push(format!("{} is not a valid URL: {}", field, value));
            }
        }

        if config.github.branch.trim().is_empty() {
            errors.push("github.branch must not be empty".to_string());
        }

        let endpoints = [
            ("backend.detect_path", &config.backend.detect_path),
            ("backend.optimize_path", &config.backend.optimize_path),
            ("backend.convert_path", &config.backend.convert_path),
            ("backend.upgrade_path", &config.backend.upgrade_path),
            ("backend.deploy_path", &config.backend.deploy_path),
        ];
        for (field, path) in endpoints {
            if !path.starts_with('/') {
                errors.push(format!("{} must start with '/': {}", field, path));
            }
        }

        if config.github.request_timeout_secs == 0 {
            errors.push("github.request_timeout_secs must be greater than zero".to_string());
        }

        if config.backend.request_timeout_secs == 0 {
            errors.push("backend.request_timeout_secs must be greater than zero".to_string());
        }

        if config.ui.diff_timeout_minutes == 0 {
            errors.push("ui.diff_timeout_minutes must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Passes `config` through when it is usable, otherwise reports every
    /// problem in one configuration error.
    pub fn ensure_valid(config: Config) -> CodeHackResult<Config> {
        match Self::validate_config(&config) {
            Ok(()) => Ok(config),
            Err(problems) => Err(CodeHackError::config_error(
                &problems.join("; "),
                None,
                Some("Fix the listed fields and run 'codehack validate' again"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigManager::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.github.branch, "main");
    }

    #[test]
    fn sample_config_round_trips_and_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("codehack").join("config.toml");

        ConfigManager::create_sample_config_at(&path).unwrap();
        let config = ConfigManager::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(ConfigManager::validate_config(&config).is_ok());
    }

    #[test]
    fn sample_config_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let result = ConfigManager::create_sample_config_at(&path);
        assert!(matches!(result, Err(CodeHackError::ConfigurationFileError { .. })));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[github]\nbranch = \"develop\"\n\n[backend]\nbase_url = \"http://backend:9000\"\n").unwrap();

        let config = ConfigManager::load_from(&path).unwrap();
        assert_eq!(config.github.branch, "develop");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.backend.base_url, "http://backend:9000");
        assert_eq!(config.backend.detect_path, "/detect");
    }

    #[test]
    fn broken_toml_is_a_config_file_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[github\nbranch = ").unwrap();

        let result = ConfigManager::load_from(&path);
        assert!(matches!(result, Err(CodeHackError::ConfigurationFileError { .. })));
    }

    #[test]
    fn validation_reports_every_problem() {
        let mut config = Config::default();
        config.backend.base_url = "not a url".to_string();
        config.backend.detect_path = "detect".to_string();
        config.backend.request_timeout_secs = 0;

        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("backend.base_url")));
        assert!(errors.iter().any(|e| e.contains("backend.detect_path")));
    }

    #[test]
    fn zero_timeouts_are_rejected_before_use() {
        let mut config = Config::default();
        config.backend.request_timeout_secs = 0;
        config.github.request_timeout_secs = 0;

        match ConfigManager::ensure_valid(config) {
            Err(CodeHackError::ConfigurationError { message, .. }) => {
                assert!(message.contains("backend.request_timeout_secs"));
                assert!(message.contains("github.request_timeout_secs"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(ConfigManager::ensure_valid(Config::default()).is_ok());
    }
}
