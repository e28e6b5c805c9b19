use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use crate::config::constants::{GITHUB_JSON_ACCEPT, GITHUB_RAW_ACCEPT, USER_AGENT};
use crate::enums::client_error::ClientError;
use crate::errors::{CodeHackError, CodeHackResult};
use crate::structs::config::github_config::GithubConfig;
use crate::structs::github::blob_ref::BlobRef;
use crate::structs::github::git_tree::GitTree;
use crate::structs::github::repo_ref::RepoRef;
use crate::structs::github::tree_entry::TreeEntry;
use crate::traits::github_source::GitHubSource;

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    branch: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &GithubConfig) -> CodeHackResult<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            CodeHackError::config_error(&e.to_string(), Some("github.api_url"), Some("Use a full URL such as https://api.github.com"))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CodeHackError::system_error("HTTP client setup", &e.to_string()))?;

        Ok(Self {
            client,
            api_url,
            branch: config.branch.clone(),
            token: config.token(),
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn tree_url(&self, repo: &RepoRef) -> CodeHackResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| CodeHackError::config_error("API URL cannot carry a path", Some("github.api_url"), None))?
            .pop_if_empty()
            .extend(["repos", &repo.owner, &repo.name, "git", "trees", &self.branch]);
        url.set_query(Some("recursive=1"));
        Ok(url)
    }

    pub fn contents_url(&self, blob: &BlobRef) -> CodeHackResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| CodeHackError::config_error("API URL cannot carry a path", Some("github.api_url"), None))?
            .pop_if_empty()
            .extend(["repos", &blob.repo.owner, &blob.repo.name, "contents"])
            .extend(blob.path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    async fn get(&self, url: Url, accept: &str) -> Result<reqwest::Response, ClientError> {
        let mut request = self.client.get(url).header(ACCEPT, accept);

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(ClientError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(ClientError::Status { status: status.as_u16(), body });
        }

        Ok(response)
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    async fn fetch_tree(&self, repo: &RepoRef) -> CodeHackResult<Vec<TreeEntry>> {
        let url = self.tree_url(repo)?;
        log::debug!("GET {}", url);

        let response = self
            .get(url.clone(), GITHUB_JSON_ACCEPT)
            .await
            .map_err(|e| e.into_fetch_error("repository tree fetch", url.as_str()))?;

        let git_tree: GitTree = response
            .json()
            .await
            .map_err(|e| ClientError::from_reqwest(e).into_fetch_error("repository tree fetch", url.as_str()))?;

        if git_tree.truncated {
            log::warn!("⚠️ GitHub truncated the tree listing for {}", repo);
        }

        git_tree.tree.ok_or_else(|| {
            ClientError::Payload("missing tree field".to_string()).into_fetch_error("repository tree fetch", url.as_str())
        })
    }

    async fn fetch_file_content(&self, blob: &BlobRef) -> CodeHackResult<String> {
        let url = self.contents_url(blob)?;
        log::debug!("GET {}", url);

        let response = self
            .get(url.clone(), GITHUB_RAW_ACCEPT)
            .await
            .map_err(|e| e.into_fetch_error("file content fetch", url.as_str()))?;

        response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(e).into_fetch_error("file content fetch", url.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GitHubClient {
        let config = GithubConfig {
            api_url: api_url.to_string(),
            ..GithubConfig::default()
        };
        GitHubClient::new(&config).unwrap().with_token(None)
    }

    #[test]
    fn tree_url_targets_recursive_branch_listing() {
        let url = client("https://api.github.com").tree_url(&RepoRef::new("acme", "widgets")).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/acme/widgets/git/trees/main?recursive=1");
    }

    #[test]
    fn contents_url_keeps_nested_path_and_escapes_segments() {
        let blob = BlobRef {
            repo: RepoRef::new("acme", "widgets"),
            path: "src/my file.js".to_string(),
        };
        let url = client("http://127.0.0.1:9000/").contents_url(&blob).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/repos/acme/widgets/contents/src/my%20file.js");
    }

    #[test]
    fn invalid_api_url_is_a_configuration_error() {
        let config = GithubConfig {
            api_url: "api.github.com".to_string(),
            ..GithubConfig::default()
        };
        let result = GitHubClient::new(&config);
        assert!(matches!(result, Err(CodeHackError::ConfigurationError { .. })));
    }
}
