use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodeHackError {
    // User input errors
    InvalidInput {
        input: String,
        expected: String,
        suggestion: String,
    },

    // Remote call errors (GitHub or analysis backend)
    FetchError {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },

    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl CodeHackError {
    pub fn invalid_input(input: &str, expected: &str, suggestion: &str) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            expected: expected.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    pub fn fetch_error(operation: &str, url: Option<&str>, status_code: Option<u16>, reason: &str) -> Self {
        Self::FetchError {
            operation: operation.to_string(),
            url: url.map(|s| s.to_string()),
            status_code,
            reason: reason.to_string(),
        }
    }

    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn config_file_error(path: &str, reason: &str) -> Self {
        Self::ConfigurationFileError {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, line_number: Option<usize>, reason: &str) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            line_number,
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::FetchError { .. })
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::FetchError { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::InvalidInput { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { input, expected, suggestion } => {
                format!("Invalid input '{}': expected {}\n💡 {}", input, expected, suggestion)
            }
            Self::FetchError { operation, url, status_code, reason } => {
                let mut msg = format!("Request failed during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str("\n💡 Check your connection and the service configuration, then trigger the action again");
                msg
            }
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::ParseError { content_type, line_number, reason } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                msg.push_str("\n💡 Check the format and syntax of the input");
                msg
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for CodeHackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for CodeHackError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for codehack operations
pub type CodeHackResult<T> = Result<T, CodeHackError>;

/// Error handler for consistent error processing.
///
/// Every failed action goes through [`ErrorHandler::surface`]: the technical
/// details are logged and the user gets a blocking alert. Nothing is retried.
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn surface(error: &CodeHackError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());

        eprintln!("\n{} {}", severity.emoji(), error.user_message());
        eprintln!("⛔ Action aborted - trigger it again to retry");
    }

    /// Alert text as shown to the user, without the log side effect.
    pub fn alert_text(error: &CodeHackError) -> String {
        format!("{} {}", error.severity().emoji(), error.user_message())
    }
}

/// Macro for easy error creation
#[macro_export]
macro_rules! codehack_error {
    (input, $input:expr, $expected:expr, $suggestion:expr) => {
        $crate::errors::CodeHackError::invalid_input($input, $expected, $suggestion)
    };
    (fetch, $op:expr, $reason:expr) => {
        $crate::errors::CodeHackError::fetch_error($op, None, None, $reason)
    };
    (fetch, $op:expr, $url:expr, $status:expr, $reason:expr) => {
        $crate::errors::CodeHackError::fetch_error($op, Some($url), $status, $reason)
    };
    (config, $msg:expr) => {
        $crate::errors::CodeHackError::config_error($msg, None, None)
    };
    (config, $msg:expr, $field:expr) => {
        $crate::errors::CodeHackError::config_error($msg, Some($field), None)
    };
    (config, $msg:expr, $field:expr, $suggestion:expr) => {
        $crate::errors::CodeHackError::config_error($msg, Some($field), Some($suggestion))
    };
}

/// Convert from standard library errors
impl From<std::io::Error> for CodeHackError {
    fn from(error: std::io::Error) -> Self {
        CodeHackError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CodeHackError {
    fn from(error: serde_json::Error) -> Self {
        CodeHackError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for CodeHackError {
    fn from(error: toml::de::Error) -> Self {
        CodeHackError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for CodeHackError {
    fn from(error: reqwest::Error) -> Self {
        let reason = if error.is_timeout() {
            format!("request timed out: {}", error)
        } else {
            error.to_string()
        };

        CodeHackError::FetchError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_message_includes_status_and_url() {
        let error = CodeHackError::fetch_error(
            "tree fetch",
            Some("https://api.github.com/repos/acme/widgets/git/trees/main"),
            Some(404),
            "Not Found",
        );

        let message = error.user_message();
        assert!(message.contains("tree fetch"));
        assert!(message.contains("Status: 404"));
        assert!(message.contains("acme/widgets"));
        assert!(error.is_fetch_error());
        assert!(!error.is_invalid_input());
    }

    #[test]
    fn macro_builds_invalid_input() {
        let error = codehack_error!(input, "gitlab.com/a/b", "a github.com/<owner>/<repo> URL", "Paste the repository URL from GitHub");
        assert!(error.is_invalid_input());
        assert_eq!(error.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: CodeHackError = json_error.into();
        assert!(matches!(error, CodeHackError::ParseError { ref content_type, .. } if content_type == "JSON"));
    }
}
