//! credentials
//!
//! Credential lookup port.
//!
//! Adapters ask an injected [`CredentialStore`] for a bearer token before
//! each request. Absence of a token means the request goes out
//! unauthenticated; it is never an error, since public repositories are the
//! common case for shared presets.
//!
//! Token storage, refresh, and keychain access belong to the embedding
//! application.

use std::sync::Arc;

/// Lookup of an optional bearer credential for a given host.
///
/// Implementations must be `Send + Sync`; a store may be shared by
/// concurrently in-flight resolutions.
pub trait CredentialStore: Send + Sync {
    /// Return the bearer token for `host`, if one is configured.
    fn find(&self, host: &str) -> Option<String>;
}

/// A store holding a single host/token pair.
///
/// Useful for tests and for applications that only ever talk to one host.
#[derive(Clone)]
pub struct StaticCredentialStore {
    host: String,
    token: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for StaticCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialStore")
            .field("host", &self.host)
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

impl StaticCredentialStore {
    /// Create a store that answers for exactly one host.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
        }
    }

    /// Convenience: wrap in an `Arc<dyn CredentialStore>`.
    pub fn shared(host: impl Into<String>, token: impl Into<String>) -> Arc<dyn CredentialStore> {
        Arc::new(Self::new(host, token))
    }
}

impl CredentialStore for StaticCredentialStore {
    fn find(&self, host: &str) -> Option<String> {
        if host == self.host && !self.token.is_empty() {
            Some(self.token.clone())
        } else {
            None
        }
    }
}

/// Extract the host portion of an endpoint URL.
///
/// `https://api.github.com/` becomes `api.github.com`. Used by adapters to
/// key credential lookups off the endpoint actually in use, so a custom
/// endpoint never receives a token meant for the public host.
pub fn endpoint_host(endpoint: &str) -> &str {
    let rest = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .unwrap_or(endpoint);
    rest.split('/').next().unwrap_or(rest)
}
