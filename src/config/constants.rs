use std::time::Duration;

pub const DEFAULT_TIMEOUT_MINUTES: u64 = 30;
pub const DEFAULT_SERVER_PORT_RANGE_START: u16 = 8080;
pub const DEFAULT_SERVER_PORT_RANGE_END: u16 = 8200;
pub const MAX_SESSION_ID_LENGTH: usize = 64;
pub const SERVER_SHUTDOWN_GRACE_PERIOD_MS: u64 = 100;
pub const SESSION_POLL_INTERVAL_MS: u64 = 500;

pub const CONFIG_DIR_NAME: &str = "codehack";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const GITHUB_RAW_ACCEPT: &str = "application/vnd.github.v3.raw";
pub const GITHUB_JSON_ACCEPT: &str = "application/vnd.github+json";
pub const DEFAULT_BRANCH: &str = "main";
pub const USER_AGENT: &str = concat!("codehack-cli/", env!("CARGO_PKG_VERSION"));

pub const BACKEND_URL_ENV: &str = "CODEHACK_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_CONVERT_PROMPT: &str = "Convert the code to the target language.";

pub const WEBVIEW_PANEL_ID: &str = "codehack.panel";
pub const EDITOR_FOCUS_CONTEXT_KEY: &str = "codehack.editorFocused";

pub const SUPPORTED_FILE_EXTENSIONS: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("swift", "swift"),
    ("dart", "dart"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("c", "c"),
    ("h", "c"),
    ("cs", "csharp"),
    ("go", "go"),
    ("php", "php"),
    ("rb", "ruby"),
    ("scala", "scala"),
    ("hs", "haskell"),
    ("ex", "elixir"),
    ("exs", "elixir"),
    ("lua", "lua"),
    ("pl", "perl"),
    ("r", "r"),
    ("jl", "julia"),
    ("sql", "sql"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("ps1", "powershell"),
    ("tf", "terraform"),
    ("html", "html"),
    ("css", "css"),
    ("json", "json"),
    ("xml", "xml"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("md", "markdown"),
];

pub const DEFAULT_FILE_TYPE: &str = "text";

pub fn timeout_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

pub fn sleep_duration_millis(milliseconds: u64) -> Duration {
    Duration::from_millis(milliseconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_timeouts_saturate() {
        assert_eq!(timeout_duration(30), Duration::from_secs(1800));
        assert_eq!(timeout_duration(u64::MAX / 10), Duration::from_secs(u64::MAX));
    }
}
