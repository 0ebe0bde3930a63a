//! provider::mock
//!
//! Mock provider implementation for deterministic testing.
//!
//! # Design
//!
//! The mock stores files in memory, serves them as plain UTF-8 content, and
//! records every operation so tests can assert on fetch ordering, in
//! particular that a platform failure short-circuits the fallback chain
//! without touching later candidates.
//!
//! # Example
//!
//! ```
//! use preset_resolver::provider::mock::MockProvider;
//! use preset_resolver::provider::PresetProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new().with_file("some/repo", "default.json", r#"{"foo":"bar"}"#);
//!
//! let raw = provider
//!     .fetch_raw_file("some/repo", "default.json", provider.default_endpoint(), None)
//!     .await
//!     .unwrap();
//! assert_eq!(raw.payload, r#"{"foo":"bar"}"#);
//!
//! let missing = provider
//!     .fetch_raw_file("some/repo", "renovate.json", provider.default_endpoint(), None)
//!     .await;
//! assert!(missing.unwrap_err().is_not_found());
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{PresetProvider, RawFileContent};
use crate::error::PresetError;

/// Mock provider for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockProvider {
    inner: Arc<Mutex<MockProviderInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockProviderInner {
    /// Stored files keyed by (repo, file path).
    files: HashMap<(String, String), String>,
    /// Branch reported by default-branch discovery, when configured.
    default_branch: Option<String>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail fetches of the named file path with the given error.
    FetchFile {
        /// File path that triggers the failure.
        file_path: String,
        /// Error to return.
        error: PresetError,
    },
    /// Fail default-branch discovery with the given error.
    ResolveDefaultBranch(PresetError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    FetchFile {
        repo: String,
        file_path: String,
        endpoint: String,
        git_ref: Option<String>,
    },
    ResolveDefaultBranch {
        repo: String,
    },
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create an empty mock provider.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockProviderInner {
                files: HashMap::new(),
                default_branch: None,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Add a file served as plain UTF-8 content.
    pub fn with_file(
        self,
        repo: impl Into<String>,
        file_path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.inner
            .lock()
            .unwrap()
            .files
            .insert((repo.into(), file_path.into()), content.into());
        self
    }

    /// Make default-branch discovery report the given branch.
    pub fn with_default_branch(self, branch: impl Into<String>) -> Self {
        self.inner.lock().unwrap().default_branch = Some(branch.into());
        self
    }

    /// Configure an operation to fail.
    pub fn fail_with(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
        self
    }

    /// Get recorded operations in call order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Count of fetches of the given file path, across repos.
    pub fn fetch_count(&self, file_path: &str) -> usize {
        self.operations()
            .iter()
            .filter(|op| {
                matches!(op, MockOperation::FetchFile { file_path: fp, .. } if fp == file_path)
            })
            .count()
    }
}

#[async_trait]
impl PresetProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn default_endpoint(&self) -> &'static str {
        "https://mock.invalid/api"
    }

    async fn resolve_default_branch(
        &self,
        repo: &str,
        _endpoint: &str,
    ) -> Result<Option<String>, PresetError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::ResolveDefaultBranch {
            repo: repo.to_string(),
        });
        if let Some(FailOn::ResolveDefaultBranch(ref error)) = inner.fail_on {
            return Err(error.clone());
        }
        Ok(inner.default_branch.clone())
    }

    async fn fetch_raw_file(
        &self,
        repo: &str,
        file_path: &str,
        endpoint: &str,
        git_ref: Option<&str>,
    ) -> Result<RawFileContent, PresetError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::FetchFile {
            repo: repo.to_string(),
            file_path: file_path.to_string(),
            endpoint: endpoint.to_string(),
            git_ref: git_ref.map(str::to_string),
        });

        if let Some(FailOn::FetchFile {
            file_path: ref fail_path,
            ref error,
        }) = inner.fail_on
        {
            if fail_path == file_path {
                return Err(error.clone());
            }
        }

        inner
            .files
            .get(&(repo.to_string(), file_path.to_string()))
            .map(|content| RawFileContent::utf8(content.clone()))
            .ok_or_else(|| PresetError::NotFound(format!("{}:{}", repo, file_path)))
    }
}
