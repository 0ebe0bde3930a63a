//! provider::gitlab
//!
//! GitLab-style provider adapter using the projects repository API.
//!
//! # Design
//!
//! GitLab's raw-file endpoint requires naming a ref, so a resolution attempt
//! is a two-step sequence:
//!
//! 1. `GET {endpoint}/projects/{repo}/repository/branches` to find the
//!    branch marked `default: true`;
//! 2. `GET {endpoint}/projects/{repo}/repository/files/{path}/raw?ref={ref}`
//!    returning the file body directly, with no envelope.
//!
//! The project path is URL-encoded into a single path segment
//! (`some/repo` -> `some%2Frepo`), as the API requires. If no branch is
//! marked default the repository has nothing to serve presets from and the
//! lookup fails as not-found rather than guessing a branch name.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::traits::{normalize_endpoint, PresetProvider, RawFileContent};
use crate::credentials::{endpoint_host, CredentialStore};
use crate::error::PresetError;

/// Default GitLab API base URL.
pub const DEFAULT_API_BASE: &str = "https://gitlab.com/api/v4";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "preset-resolver";

/// GitLab-style provider adapter.
pub struct GitLabProvider {
    /// HTTP client for making requests
    client: Client,
    /// Optional credential lookup, keyed by endpoint host
    credentials: Option<Arc<dyn CredentialStore>>,
}

// Custom Debug to avoid exposing anything the credential store holds
impl std::fmt::Debug for GitLabProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabProvider")
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

impl Default for GitLabProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitLabProvider {
    /// Create an adapter that makes unauthenticated requests.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            credentials: None,
        }
    }

    /// Create an adapter that looks up a bearer token per request.
    pub fn with_credentials(credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: Client::new(),
            credentials: Some(credentials),
        }
    }

    /// Build common headers for API requests.
    fn headers(&self, endpoint: &str) -> Result<HeaderMap, PresetError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(ref store) = self.credentials {
            if let Some(token) = store.find(endpoint_host(endpoint)) {
                let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                    PresetError::PlatformFailure("credential is not a valid header value".into())
                })?;
                headers.insert(AUTHORIZATION, value);
            }
        }
        Ok(headers)
    }

    /// Base URL of the repository sub-API for `repo`.
    fn repository_url(&self, repo: &str, endpoint: &str) -> String {
        format!(
            "{}/projects/{}/repository",
            normalize_endpoint(endpoint),
            urlencoding::encode(repo)
        )
    }

    /// List branches and return the one marked default.
    async fn default_branch(&self, repo: &str, endpoint: &str) -> Result<String, PresetError> {
        let url = format!("{}/branches", self.repository_url(repo, endpoint));

        tracing::debug!(%url, "discovering default branch on GitLab");

        let response = self
            .client
            .get(&url)
            .headers(self.headers(endpoint)?)
            .send()
            .await
            .map_err(|e| PresetError::PlatformFailure(format!("network error: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PresetError::NotFound(repo.to_string()));
        }
        if !status.is_success() {
            return Err(PresetError::PlatformFailure(format!(
                "GitLab error listing branches for {}: {}",
                repo, status
            )));
        }

        let branches: Vec<BranchInfo> = response.json().await.map_err(|e| {
            PresetError::PlatformFailure(format!(
                "unreadable branch listing for {}: {}",
                repo, e
            ))
        })?;

        branches
            .into_iter()
            .find(|branch| branch.default)
            .map(|branch| branch.name)
            .ok_or_else(|| PresetError::NotFound(format!("no default branch in {}", repo)))
    }
}

#[async_trait]
impl PresetProvider for GitLabProvider {
    fn name(&self) -> &'static str {
        "gitlab"
    }

    fn default_endpoint(&self) -> &'static str {
        DEFAULT_API_BASE
    }

    async fn resolve_default_branch(
        &self,
        repo: &str,
        endpoint: &str,
    ) -> Result<Option<String>, PresetError> {
        self.default_branch(repo, endpoint).await.map(Some)
    }

    async fn fetch_raw_file(
        &self,
        repo: &str,
        file_path: &str,
        endpoint: &str,
        git_ref: Option<&str>,
    ) -> Result<RawFileContent, PresetError> {
        let git_ref = match git_ref {
            Some(git_ref) => git_ref.to_string(),
            None => self.default_branch(repo, endpoint).await?,
        };

        let url = format!(
            "{}/files/{}/raw?ref={}",
            self.repository_url(repo, endpoint),
            urlencoding::encode(file_path),
            git_ref
        );
        let reference = format!("{}:{}", repo, file_path);

        tracing::debug!(%url, "fetching preset file from GitLab");

        let response = self
            .client
            .get(&url)
            .headers(self.headers(endpoint)?)
            .send()
            .await
            .map_err(|e| PresetError::PlatformFailure(format!("network error: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PresetError::NotFound(reference));
        }
        if !status.is_success() {
            return Err(PresetError::PlatformFailure(format!(
                "GitLab error fetching {}: {}",
                reference, status
            )));
        }

        // Raw endpoint: the body is the file itself, no envelope.
        let body = response
            .text()
            .await
            .map_err(|e| PresetError::PlatformFailure(format!("network error: {}", e)))?;

        Ok(RawFileContent::utf8(body))
    }
}

/// One row of the GitLab branch listing.
#[derive(Deserialize)]
struct BranchInfo {
    name: String,
    #[serde(default)]
    default: bool,
}
