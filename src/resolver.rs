//! resolver
//!
//! Preset resolution orchestration.
//!
//! # Design
//!
//! [`PresetResolver`] ties the pieces together: it delegates the fetch to
//! its [`PresetProvider`], decodes the payload, then extracts the requested
//! nested value. When no preset name is given it walks the fallback list of
//! candidate file names in declared order.
//!
//! The fallback chain is strictly sequential. A candidate is only skipped
//! past on [`PresetError::NotFound`]; a platform failure aborts immediately,
//! and malformed JSON aborts immediately as well (a corrupted file is not
//! the same as an absent one).
//!
//! Each resolution is a single logical call chain with sequential dependent
//! fetches and no shared mutable state of its own; dropping the future
//! cancels at the next suspension point without leaving partial cached
//! state, because the cache is only written after a fully successful fetch
//! and decode.
//!
//! [`PresetError::NotFound`]: crate::error::PresetError::NotFound

use std::sync::Arc;

use serde_json::Value;

use crate::cache::{NoopCache, PresetCache};
use crate::decode;
use crate::error::PresetError;
use crate::path;
use crate::provider::PresetProvider;

/// Candidate file names tried, in order, when no preset name is given.
pub const FALLBACK_FILE_NAMES: [&str; 2] = ["default", "renovate"];

/// A reference to a preset to resolve.
///
/// `package_name` is opaque to this crate; its meaning (owner/repo,
/// group/project) belongs to the provider. It must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRequest {
    /// Repository or namespace holding the preset file.
    pub package_name: String,
    /// Preset name, e.g. `"default"`, `"custom"`, or
    /// `"somefile/somename/somesubname"`. `None` engages the fallback list.
    pub preset_name: Option<String>,
    /// Override of the provider's default API base URL.
    pub endpoint: Option<String>,
}

impl PresetRequest {
    /// Request the implicit default preset of a package.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            preset_name: None,
            endpoint: None,
        }
    }

    /// Set the preset name.
    pub fn with_preset_name(mut self, preset_name: impl Into<String>) -> Self {
        self.preset_name = Some(preset_name.into());
        self
    }

    /// Set a custom endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Resolves preset references against one hosting provider.
///
/// Holds no global mutable state; a single resolver may serve concurrently
/// in-flight resolutions for different packages.
pub struct PresetResolver {
    provider: Arc<dyn PresetProvider>,
    cache: Arc<dyn PresetCache>,
}

impl std::fmt::Debug for PresetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetResolver")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl PresetResolver {
    /// Create a resolver with no caching.
    pub fn new(provider: Arc<dyn PresetProvider>) -> Self {
        Self {
            provider,
            cache: Arc::new(NoopCache),
        }
    }

    /// Create a resolver with an injected cache.
    pub fn with_cache(provider: Arc<dyn PresetProvider>, cache: Arc<dyn PresetCache>) -> Self {
        Self { provider, cache }
    }

    /// Resolve a preset reference to its JSON value.
    ///
    /// # Errors
    ///
    /// - [`PresetError::NotFound`] when the named file or nested key does
    ///   not exist (after exhausting fallback candidates, if applicable)
    /// - [`PresetError::InvalidJson`] when fetched content is empty or
    ///   unparseable
    /// - [`PresetError::PlatformFailure`] when the upstream host is
    ///   unavailable; fallback candidates after the failure are never tried
    ///
    /// [`PresetError::NotFound`]: crate::error::PresetError::NotFound
    /// [`PresetError::InvalidJson`]: crate::error::PresetError::InvalidJson
    /// [`PresetError::PlatformFailure`]: crate::error::PresetError::PlatformFailure
    pub async fn get_preset(&self, request: &PresetRequest) -> Result<Value, PresetError> {
        self.get_preset_from_endpoint(
            &request.package_name,
            request.preset_name.as_deref(),
            request.endpoint.as_deref(),
        )
        .await
    }

    /// Resolve a preset with the endpoint given explicitly.
    ///
    /// Same contract as [`get_preset`](Self::get_preset); `None` for the
    /// endpoint means the provider's public API base.
    pub async fn get_preset_from_endpoint(
        &self,
        package_name: &str,
        preset_name: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<Value, PresetError> {
        if package_name.is_empty() {
            return Err(PresetError::NotFound(
                "empty package name in preset reference".to_string(),
            ));
        }

        match preset_name.filter(|name| !name.is_empty()) {
            None => self.resolve_fallback(package_name, endpoint).await,
            Some(preset_name) => {
                self.resolve_named(package_name, preset_name, endpoint).await
            }
        }
    }

    /// Fetch and decode a single JSON file. No fallback, no traversal.
    ///
    /// Consults the injected cache first; the cache is written only after a
    /// fully successful fetch and decode.
    pub async fn fetch_json_file(
        &self,
        repo: &str,
        file_name: &str,
        endpoint: Option<&str>,
    ) -> Result<Value, PresetError> {
        let endpoint = endpoint.unwrap_or_else(|| self.provider.default_endpoint());
        let key = format!("{}:{}:{}:{}", self.provider.name(), endpoint, repo, file_name);

        if let Some(value) = self.cache.get(&key) {
            tracing::debug!(%key, "preset file served from cache");
            return Ok(value);
        }

        // Branch discovery happens once per fetch attempt; the ref is then
        // threaded through so the file fetch never re-discovers it.
        let git_ref = self.provider.resolve_default_branch(repo, endpoint).await?;
        let raw = self
            .provider
            .fetch_raw_file(repo, file_name, endpoint, git_ref.as_deref())
            .await?;

        let reference = format!("{}:{}", repo, file_name);
        let value = decode::decode(&raw, &reference)?;

        self.cache.set(&key, value.clone());
        Ok(value)
    }

    /// Walk the fallback candidate list for a package with no preset name.
    async fn resolve_fallback(
        &self,
        package_name: &str,
        endpoint: Option<&str>,
    ) -> Result<Value, PresetError> {
        for candidate in FALLBACK_FILE_NAMES {
            let file_name = format!("{}.json", candidate);
            match self.fetch_json_file(package_name, &file_name, endpoint).await {
                Ok(value) => {
                    if candidate == "renovate" {
                        tracing::warn!(
                            package_name,
                            "using renovate.json as a preset file is deprecated; \
                             rename it to default.json"
                        );
                    }
                    return Ok(value);
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(package_name, %file_name, "preset candidate absent, trying next");
                }
                // Platform failures and malformed JSON abort the chain.
                Err(err) => return Err(err),
            }
        }
        Err(PresetError::NotFound(package_name.to_string()))
    }

    /// Resolve an explicitly named preset, traversing into the file when the
    /// name carries path segments.
    async fn resolve_named(
        &self,
        package_name: &str,
        preset_name: &str,
        endpoint: Option<&str>,
    ) -> Result<Value, PresetError> {
        let parsed = path::parse(preset_name);
        let file_name = format!("{}.json", parsed.file_name);
        let document = self
            .fetch_json_file(package_name, &file_name, endpoint)
            .await?;

        if parsed.segments.is_empty() {
            return Ok(document);
        }
        // A missing segment reports the full original preset name, not just
        // the file, so the operator sees exactly what was asked for.
        path::extract(&document, &parsed.segments, preset_name)
    }
}
