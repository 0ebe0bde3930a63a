//! Integration tests for the GitLab-style adapter.
//!
//! GitLab resolution is a two-step sequence: branch discovery, then a raw
//! file fetch at the discovered ref. These tests run both steps against a
//! wiremock server, including the URL-encoded project path
//! (`some/repo` -> `some%2Frepo`).

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use preset_resolver::provider::gitlab::GitLabProvider;
use preset_resolver::{PresetError, PresetRequest, PresetResolver};

const REPO_PATH: &str = "/projects/some%2Frepo/repository";

fn resolver() -> PresetResolver {
    PresetResolver::new(Arc::new(GitLabProvider::new()))
}

async fn mount_branches(server: &MockServer, branches: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("{}/branches", REPO_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(branches))
        .mount(server)
        .await;
}

async fn mount_raw_file(server: &MockServer, file_name: &str, git_ref: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("{}/files/{}/raw", REPO_PATH, file_name)))
        .and(query_param("ref", git_ref))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn branch_listing_failure_is_platform_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/branches", REPO_PATH)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = resolver()
        .get_preset(
            &PresetRequest::new("some/repo")
                .with_preset_name("non-default")
                .with_endpoint(server.uri()),
        )
        .await
        .unwrap_err();

    assert!(err.is_platform_failure());
}

#[tokio::test]
async fn missing_files_on_default_branch_reject_with_not_found() {
    let server = MockServer::start().await;
    mount_branches(
        &server,
        json!([{"name": "devel"}, {"name": "master", "default": true}]),
    )
    .await;
    for file in ["default.json", "renovate.json"] {
        Mock::given(method("GET"))
            .and(path(format!("{}/files/{}/raw", REPO_PATH, file)))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
    }

    let err = resolver()
        .get_preset(&PresetRequest::new("some/repo").with_endpoint(server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err, PresetError::NotFound("some/repo".to_string()));
}

#[tokio::test]
async fn returns_the_preset_from_the_default_branch() {
    let server = MockServer::start().await;
    mount_branches(
        &server,
        json!([{"name": "devel"}, {"name": "master", "default": true}]),
    )
    .await;
    mount_raw_file(&server, "default.json", "master", json!({"foo": "bar"})).await;

    let value = resolver()
        .get_preset(&PresetRequest::new("some/repo").with_endpoint(server.uri()))
        .await
        .unwrap();

    assert_eq!(value, json!({"foo": "bar"}));
}

#[tokio::test]
async fn discovery_picks_the_branch_marked_default() {
    let server = MockServer::start().await;
    mount_branches(&server, json!([{"name": "devel", "default": true}])).await;
    // Mounted only for ref=devel; a fetch at any other ref would 404.
    mount_raw_file(
        &server,
        "some.json",
        "devel",
        json!({"preset": {"file": {}}}),
    )
    .await;

    let value = resolver()
        .get_preset_from_endpoint("some/repo", Some("some/preset/file"), Some(&server.uri()))
        .await
        .unwrap();

    assert_eq!(value, json!({}));
}

#[tokio::test]
async fn no_branch_marked_default_is_not_found() {
    let server = MockServer::start().await;
    mount_branches(&server, json!([{"name": "devel"}, {"name": "master"}])).await;

    let err = resolver()
        .get_preset(
            &PresetRequest::new("some/repo")
                .with_preset_name("default")
                .with_endpoint(server.uri()),
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("some/repo"));
}

#[tokio::test]
async fn custom_endpoint_missing_file_is_not_found() {
    let server = MockServer::start().await;
    mount_branches(&server, json!([{"name": "devel", "default": true}])).await;
    Mock::given(method("GET"))
        .and(path(format!("{}/files/some.json/raw", REPO_PATH)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = resolver()
        .get_preset_from_endpoint("some/repo", Some("some/preset/file"), Some(&server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn raw_body_needs_no_envelope() {
    // The raw endpoint returns the file body directly; a plain string body
    // must decode the same as a JSON-typed one.
    let server = MockServer::start().await;
    mount_branches(&server, json!([{"name": "main", "default": true}])).await;
    Mock::given(method("GET"))
        .and(path(format!("{}/files/default.json/raw", REPO_PATH)))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"foo":"bar"}"#))
        .mount(&server)
        .await;

    let value = resolver()
        .get_preset(&PresetRequest::new("some/repo").with_endpoint(server.uri()))
        .await
        .unwrap();

    assert_eq!(value, json!({"foo": "bar"}));
}

#[tokio::test]
async fn file_server_error_aborts_fallback() {
    let server = MockServer::start().await;
    mount_branches(&server, json!([{"name": "main", "default": true}])).await;
    Mock::given(method("GET"))
        .and(path(format!("{}/files/default.json/raw", REPO_PATH)))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/files/renovate.json/raw", REPO_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let err = resolver()
        .get_preset(&PresetRequest::new("some/repo").with_endpoint(server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_platform_failure());
}
