//! provider::factory
//!
//! Provider selection and creation.
//!
//! Embedding configuration selects an adapter by name; the resolver itself
//! never inspects which adapter it holds. [`create_provider`] is the single
//! place that maps a [`ProviderKind`] to a concrete adapter, so callers
//! don't import adapter types directly.

use std::sync::Arc;

use super::github::GitHubProvider;
use super::gitlab::GitLabProvider;
use super::traits::PresetProvider;
use crate::credentials::CredentialStore;
use crate::error::PresetError;

/// Supported hosting providers.
///
/// A small closed set of tagged variants; adding a provider means adding a
/// variant here and an adapter module next to the existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// GitHub-style contents API (base64 envelope).
    GitHub,
    /// GitLab-style repository API (branch discovery + raw file).
    GitLab,
}

impl ProviderKind {
    /// Get all supported providers.
    pub fn all() -> &'static [ProviderKind] {
        &[ProviderKind::GitHub, ProviderKind::GitLab]
    }

    /// Get the provider name as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "github",
            ProviderKind::GitLab => "gitlab",
        }
    }

    /// Parse a provider from its configuration name.
    ///
    /// # Example
    ///
    /// ```
    /// use preset_resolver::provider::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::parse("github"), Some(ProviderKind::GitHub));
    /// assert_eq!(ProviderKind::parse("GitLab"), Some(ProviderKind::GitLab));
    /// assert_eq!(ProviderKind::parse("unknown"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "github" => Some(ProviderKind::GitHub),
            "gitlab" => Some(ProviderKind::GitLab),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Create an adapter for `kind`, optionally wired to a credential store.
pub fn create_provider(
    kind: ProviderKind,
    credentials: Option<Arc<dyn CredentialStore>>,
) -> Arc<dyn PresetProvider> {
    match kind {
        ProviderKind::GitHub => match credentials {
            Some(store) => Arc::new(GitHubProvider::with_credentials(store)),
            None => Arc::new(GitHubProvider::new()),
        },
        ProviderKind::GitLab => match credentials {
            Some(store) => Arc::new(GitLabProvider::with_credentials(store)),
            None => Arc::new(GitLabProvider::new()),
        },
    }
}

/// Create an adapter from a configuration name.
///
/// # Errors
///
/// Returns [`PresetError::NotFound`] naming the unknown provider and the
/// valid alternatives.
pub fn create_provider_by_name(
    name: &str,
    credentials: Option<Arc<dyn CredentialStore>>,
) -> Result<Arc<dyn PresetProvider>, PresetError> {
    let kind = ProviderKind::parse(name).ok_or_else(|| {
        PresetError::NotFound(format!(
            "unknown provider '{}'. Supported providers: {}",
            name,
            valid_provider_names().join(", ")
        ))
    })?;
    Ok(create_provider(kind, credentials))
}

/// Get list of valid provider names for configuration validation.
pub fn valid_provider_names() -> Vec<&'static str> {
    ProviderKind::all().iter().map(|kind| kind.name()).collect()
}
