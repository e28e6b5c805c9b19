use thiserror::Error;
use crate::errors::CodeHackError;

/// Failure of a single HTTP exchange, before it is given user-facing context.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Payload(String),
}

impl ClientError {
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Payload(error.to_string())
        } else if error.is_timeout() {
            ClientError::Network(format!("request timed out: {}", error))
        } else {
            ClientError::Network(error.to_string())
        }
    }

    pub fn into_fetch_error(self, operation: &str, url: &str) -> CodeHackError {
        let status_code = match &self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        };
        CodeHackError::fetch_error(operation, Some(url), status_code, &self.to_string())
    }
}
