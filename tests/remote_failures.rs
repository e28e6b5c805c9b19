use std::time::Duration;
use codehack::enums::request_slot::RequestSlot;
use codehack::errors::CodeHackError;
use codehack::structs::github::repo_ref::RepoRef;
use codehack::traits::analysis_backend::AnalysisBackend;
use codehack::traits::github_source::GitHubSource;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use crate::common::{backend_client, controller, github_client, github_client_with_timeout, mount_widgets_tree, REPO_URL};

#[tokio::test]
async fn missing_repository_is_a_fetch_error() {
    let github = MockServer::start().await;
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/git/trees/main"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&github)
        .await;

    let mut controller = controller(&github, &backend);
    let error = controller.load_repository(REPO_URL).await.unwrap_err();

    match error {
        CodeHackError::FetchError { status_code, .. } => assert_eq!(status_code, Some(404)),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!controller.store().is_loading(RequestSlot::Tree));
    assert!(controller.store().entries().is_empty());
}

#[tokio::test]
async fn tree_payload_without_tree_field_is_a_fetch_error() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/git/trees/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sha": "9fb0", "truncated": false })))
        .mount(&github)
        .await;

    let error = github_client(&github)
        .fetch_tree(&RepoRef::new("acme", "widgets"))
        .await
        .unwrap_err();

    assert!(error.is_fetch_error());
}

#[tokio::test]
async fn malformed_repository_url_makes_no_request() {
    let github = MockServer::start().await;
    let backend = MockServer::start().await;

    let mut controller = controller(&github, &backend);
    let error = controller.load_repository("https://gitlab.com/acme/widgets").await.unwrap_err();

    assert!(error.is_invalid_input());
    assert!(github.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/git/trees/main"))
        .and(header("authorization", "Bearer s3cr3t"))
        .and(header("user-agent", codehack::config::constants::USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tree": [] })))
        .expect(1)
        .mount(&github)
        .await;

    let entries = github_client(&github)
        .with_token(Some("s3cr3t".to_string()))
        .fetch_tree(&RepoRef::new("acme", "widgets"))
        .await
        .unwrap();

    assert!(entries.is_empty());
}

#[tokio::test]
async fn backend_server_error_is_a_fetch_error() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Code detection failed"))
        .mount(&backend)
        .await;

    let error = backend_client(&backend).detect_code("var x=1").await.unwrap_err();

    match error {
        CodeHackError::FetchError { status_code, reason, .. } => {
            assert_eq!(status_code, Some(500));
            assert!(reason.contains("Code detection failed"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn detect_failure_keeps_file_and_clears_loading() {
    let github = MockServer::start().await;
    let backend = MockServer::start().await;
    mount_widgets_tree(&github).await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/contents/src/a.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("var x=1"))
        .mount(&github)
        .await;
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "no issues key" })))
        .mount(&backend)
        .await;

    let mut controller = controller(&github, &backend);
    controller.load_repository(REPO_URL).await.unwrap();
    let error = controller.open_entry(1).await.unwrap_err();

    assert!(error.is_fetch_error());
    assert_eq!(controller.store().buffer(), "var x=1");
    assert!(!controller.store().is_loading(RequestSlot::Detect));
}

#[tokio::test]
async fn stalled_github_call_times_out() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/git/trees/main"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "tree": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&github)
        .await;

    let error = github_client_with_timeout(&github, 1)
        .fetch_tree(&RepoRef::new("acme", "widgets"))
        .await
        .unwrap_err();

    match error {
        CodeHackError::FetchError { reason, status_code, .. } => {
            assert!(reason.contains("timed out"), "reason: {}", reason);
            assert_eq!(status_code, None);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
