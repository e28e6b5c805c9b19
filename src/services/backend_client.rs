use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::config::constants::USER_AGENT;
use crate::enums::client_error::ClientError;
use crate::errors::{CodeHackError, CodeHackResult};
use crate::structs::backend::code_request::{CodePromptRequest, DetectRequest};
use crate::structs::backend::code_response::{CodeResponse, ConvertResult, DetectResponse};
use crate::structs::config::backend_config::BackendConfig;
use crate::structs::issue::Issue;
use crate::traits::analysis_backend::AnalysisBackend;

/// HTTP client for the code-analysis backend. Every call is a single
/// request/response exchange; failures are never retried.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> CodeHackResult<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            CodeHackError::config_error(&e.to_string(), Some("backend.base_url"), Some("Use a full URL such as http://127.0.0.1:8000"))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CodeHackError::system_error("HTTP client setup", &e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, operation: &str, path: &str, body: &B) -> CodeHackResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        log::debug!("POST {} ({})", url, operation);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e).into_fetch_error(operation, &url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(ClientError::Status { status: status.as_u16(), body }.into_fetch_error(operation, &url));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ClientError::Payload(e.to_string()).into_fetch_error(operation, &url))
    }

    async fn post_code_prompt(&self, operation: &str, path: &str, code: &str, prompt: &str) -> CodeHackResult<String> {
        let response: CodeResponse = self
            .post_json(operation, path, &CodePromptRequest { code, prompt })
            .await?;

        response.code.ok_or_else(|| {
            ClientError::Payload("missing code field".to_string()).into_fetch_error(operation, &self.endpoint(path))
        })
    }
}

#[async_trait]
impl AnalysisBackend for BackendClient {
    async fn detect_code(&self, code: &str) -> CodeHackResult<Vec<Issue>> {
        let path = self.config.detect_path.clone();
        let response: DetectResponse = self
            .post_json("code detection", &path, &DetectRequest { code })
            .await?;

        response.issues.ok_or_else(|| {
            ClientError::Payload("missing issues field".to_string()).into_fetch_error("code detection", &self.endpoint(&path))
        })
    }

    async fn optimize_code(&self, code: &str, prompt: &str) -> CodeHackResult<String> {
        self.post_code_prompt("code optimization", &self.config.optimize_path, code, prompt).await
    }

    async fn convert_code(&self, code: &str, prompt: &str) -> CodeHackResult<ConvertResult> {
        self.post_json("code conversion", &self.config.convert_path, &CodePromptRequest { code, prompt })
            .await
    }

    async fn upgrade_code(&self, code: &str, prompt: &str) -> CodeHackResult<String> {
        self.post_code_prompt("code upgrade", &self.config.upgrade_path, code, prompt).await
    }

    async fn deploy_code(&self, code: &str, prompt: &str) -> CodeHackResult<String> {
        self.post_code_prompt("deployment generation", &self.config.deploy_path, code, prompt).await
    }
}
