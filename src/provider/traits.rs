//! provider::traits
//!
//! Provider adapter contract for fetching preset files from remote hosting
//! services.
//!
//! # Design
//!
//! The [`PresetProvider`] trait is async because every operation involves
//! network I/O. One adapter exists per hosting API; the resolver is written
//! against this trait only and never inspects which adapter it holds.
//!
//! Adapters reconcile heterogeneous hosting APIs behind one contract:
//!
//! - different auth headers and endpoint shapes stay inside the adapter;
//! - a 404 from the transport is classified as [`PresetError::NotFound`],
//!   a normal outcome that drives the resolver's fallback chain;
//! - every other non-2xx response and any transport failure is classified
//!   as [`PresetError::PlatformFailure`] so callers can tell "nothing
//!   configured" apart from "host is down";
//! - default-branch discovery, where the API requires naming a ref, is a
//!   separate operation performed once per resolution attempt.
//!
//! [`PresetError::NotFound`]: crate::error::PresetError::NotFound
//! [`PresetError::PlatformFailure`]: crate::error::PresetError::PlatformFailure

use async_trait::async_trait;

use crate::error::PresetError;

/// Transport encoding of a fetched file payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// Payload is the file text itself.
    Utf8,
    /// Payload is base64 (possibly with embedded newlines, as GitHub emits).
    Base64,
}

/// Raw file content as returned by a provider, before decoding.
///
/// Ephemeral; owned by the fetch call that produced it and consumed by
/// [`decode`](crate::decode::decode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFileContent {
    /// The payload. May be empty when the provider's envelope carried no
    /// content; the decoder classifies that case.
    pub payload: String,
    /// How `payload` is encoded.
    pub encoding: ContentEncoding,
}

impl RawFileContent {
    /// Plain UTF-8 content.
    pub fn utf8(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            encoding: ContentEncoding::Utf8,
        }
    }

    /// Base64-encoded content.
    pub fn base64(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            encoding: ContentEncoding::Base64,
        }
    }
}

/// Trim a trailing slash so adapters can join paths uniformly.
///
/// A custom endpoint is otherwise used verbatim.
pub fn normalize_endpoint(endpoint: &str) -> &str {
    endpoint.trim_end_matches('/')
}

/// The provider adapter contract.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single adapter instance may
/// serve concurrently in-flight resolutions for different repositories and
/// must hold no per-call mutable state.
#[async_trait]
pub trait PresetProvider: Send + Sync + std::fmt::Debug {
    /// Provider name (e.g. "github", "gitlab").
    fn name(&self) -> &'static str;

    /// Public API base used when the caller supplies no endpoint.
    fn default_endpoint(&self) -> &'static str;

    /// Discover the default branch for `repo`, when the provider's file
    /// endpoint requires naming a ref.
    ///
    /// Returns `Ok(None)` for providers whose file endpoint serves the
    /// default branch implicitly (no network call is made). Providers that
    /// must name a ref return `Ok(Some(branch))`.
    ///
    /// # Errors
    ///
    /// - [`PresetError::NotFound`] if the repository is unknown or no branch
    ///   is marked default
    /// - [`PresetError::PlatformFailure`] on any other upstream failure
    ///
    /// [`PresetError::NotFound`]: crate::error::PresetError::NotFound
    /// [`PresetError::PlatformFailure`]: crate::error::PresetError::PlatformFailure
    async fn resolve_default_branch(
        &self,
        repo: &str,
        endpoint: &str,
    ) -> Result<Option<String>, PresetError>;

    /// Fetch a single file's raw content.
    ///
    /// `git_ref` is the branch or tag to read from; `None` means the
    /// provider's default branch (adapters that require a ref discover it
    /// themselves in that case).
    ///
    /// # Errors
    ///
    /// - [`PresetError::NotFound`] on 404, the expected "file absent"
    ///   outcome used to drive fallback
    /// - [`PresetError::PlatformFailure`] on any other non-2xx response or
    ///   transport failure
    /// - [`PresetError::InvalidJson`] when the provider's response envelope
    ///   itself cannot be read
    ///
    /// [`PresetError::NotFound`]: crate::error::PresetError::NotFound
    /// [`PresetError::PlatformFailure`]: crate::error::PresetError::PlatformFailure
    /// [`PresetError::InvalidJson`]: crate::error::PresetError::InvalidJson
    async fn fetch_raw_file(
        &self,
        repo: &str,
        file_path: &str,
        endpoint: &str,
        git_ref: Option<&str>,
    ) -> Result<RawFileContent, PresetError>;
}
