//! provider::github
//!
//! GitHub-style provider adapter using the repository contents API.
//!
//! # Design
//!
//! A single `GET {endpoint}/repos/{repo}/contents/{path}` request per
//! candidate file. The response is a JSON envelope whose `content` field
//! carries the file body as base64 (with embedded newlines); extraction of
//! that field happens here, decoding happens in [`decode`](crate::decode).
//!
//! The contents endpoint serves the repository's default branch when no ref
//! is named, so [`resolve_default_branch`] is a no-op returning `Ok(None)`
//! and no discovery request is spent.
//!
//! # Authentication
//!
//! An injected [`CredentialStore`] is consulted per request, keyed by the
//! host of the endpoint in use. No token means an unauthenticated request.
//!
//! [`resolve_default_branch`]: GitHubProvider::resolve_default_branch
//! [`CredentialStore`]: crate::credentials::CredentialStore

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::traits::{normalize_endpoint, PresetProvider, RawFileContent};
use crate::credentials::{endpoint_host, CredentialStore};
use crate::error::PresetError;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "preset-resolver";

/// GitHub-style provider adapter.
pub struct GitHubProvider {
    /// HTTP client for making requests
    client: Client,
    /// Optional credential lookup, keyed by endpoint host
    credentials: Option<Arc<dyn CredentialStore>>,
}

// Custom Debug to avoid exposing anything the credential store holds
impl std::fmt::Debug for GitHubProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubProvider")
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubProvider {
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
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
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
}

#[async_trait]
impl PresetProvider for GitHubProvider {
    fn name(&self) -> &'static str {
        "github"
    }

    fn default_endpoint(&self) -> &'static str {
        DEFAULT_API_BASE
    }

    async fn resolve_default_branch(
        &self,
        _repo: &str,
        _endpoint: &str,
    ) -> Result<Option<String>, PresetError> {
        // The contents endpoint serves the default branch when no ref is
        // named, so there is nothing to discover.
        Ok(None)
    }

    async fn fetch_raw_file(
        &self,
        repo: &str,
        file_path: &str,
        endpoint: &str,
        git_ref: Option<&str>,
    ) -> Result<RawFileContent, PresetError> {
        let base = normalize_endpoint(endpoint);
        let mut url = format!("{}/repos/{}/contents/{}", base, repo, file_path);
        if let Some(git_ref) = git_ref {
            url.push_str(&format!("?ref={}", git_ref));
        }
        let reference = format!("{}:{}", repo, file_path);

        tracing::debug!(%url, "fetching preset file from GitHub");

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
                "GitHub error fetching {}: {}",
                reference, status
            )));
        }

        let envelope: ContentsResponse = response
            .json()
            .await
            .map_err(|_| PresetError::InvalidJson(reference))?;

        // An envelope without content (e.g. a directory listing) yields an
        // empty payload; the decoder classifies it as invalid preset JSON.
        Ok(RawFileContent::base64(
            envelope.content.unwrap_or_default(),
        ))
    }
}

/// GitHub contents endpoint response envelope.
#[derive(Deserialize)]
struct ContentsResponse {
    content: Option<String>,
}
