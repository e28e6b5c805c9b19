use async_trait::async_trait;
use crate::errors::CodeHackResult;
use crate::structs::backend::code_response::ConvertResult;
use crate::structs::issue::Issue;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn detect_code(&self, code: &str) -> CodeHackResult<Vec<Issue>>;

    /// `prompt` is the JSON array of the issues to address.
    async fn optimize_code(&self, code: &str, prompt: &str) -> CodeHackResult<String>;

    async fn convert_code(&self, code: &str, prompt: &str) -> CodeHackResult<ConvertResult>;

    async fn upgrade_code(&self, code: &str, prompt: &str) -> CodeHackResult<String>;

    async fn deploy_code(&self, code: &str, prompt: &str) -> CodeHackResult<String>;
}
