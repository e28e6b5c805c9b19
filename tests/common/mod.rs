use std::sync::Arc;
use codehack::services::backend_client::BackendClient;
use codehack::services::github_client::GitHubClient;
use codehack::services::session_controller::SessionController;
use codehack::structs::config::backend_config::BackendConfig;
use codehack::structs::config::github_config::GithubConfig;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REPO_URL: &str = "https://github.com/acme/widgets";

pub fn github_client(server: &MockServer) -> GitHubClient {
    github_client_with_timeout(server, 5)
}

pub fn github_client_with_timeout(server: &MockServer, request_timeout_secs: u64) -> GitHubClient {
    let config = GithubConfig {
        api_url: server.uri(),
        request_timeout_secs,
        ..GithubConfig::default()
    };
    GitHubClient::new(&config).unwrap().with_token(None)
}

pub fn backend_client(server: &MockServer) -> BackendClient {
    let config = BackendConfig {
        base_url: server.uri(),
        request_timeout_secs: 5,
        ..BackendConfig::default()
    };
    BackendClient::new(&config).unwrap()
}

pub fn controller(github: &MockServer, backend: &MockServer) -> SessionController {
    SessionController::new(Arc::new(github_client(github)), Arc::new(backend_client(backend)))
}

/// Recursive listing with one directory and one file, `src/a.js`.
pub fn widgets_tree(server: &MockServer) -> Value {
    json!({
        "sha": "9fb0",
        "url": format!("{}/repos/acme/widgets/git/trees/9fb0", server.uri()),
        "truncated": false,
        "tree": [
            {
                "path": "src",
                "mode": "040000",
                "type": "tree",
                "sha": "d1a2",
                "url": format!("{}/repos/acme/widgets/git/trees/d1a2", server.uri())
            },
            {
                "path": "src/a.js",
                "mode": "100644",
                "type": "blob",
                "sha": "3f1e",
                "size": 7,
                "url": format!("{}/repos/acme/widgets/git/blobs/3f1e", server.uri())
            }
        ]
    })
}

pub async fn mount_widgets_tree(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/git/trees/main"))
        .and(query_param("recursive", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widgets_tree(server)))
        .mount(server)
        .await;
}
