//! error
//!
//! Error taxonomy for preset resolution.
//!
//! # Design
//!
//! Every failure in this crate collapses into one of three kinds, because
//! callers need exactly three behaviors:
//!
//! - [`PresetError::NotFound`]: the named file or nested key does not exist.
//!   Expected during fallback; drives the candidate chain forward.
//! - [`PresetError::InvalidJson`]: content was fetched but is empty,
//!   undecodable, or not parseable as JSON. Fatal for that reference.
//! - [`PresetError::PlatformFailure`]: the upstream host returned a server
//!   error or the transport failed outright. Fatal, short-circuits fallback,
//!   and is the only kind worth retrying later.
//!
//! Raw `reqwest::Error` and `serde_json::Error` values never escape this
//! crate; adapters and the decoder re-classify them at their boundaries.
//!
//! # Example
//!
//! ```
//! use preset_resolver::PresetError;
//!
//! let err = PresetError::NotFound("some/repo:default.json".to_string());
//! assert!(err.is_not_found());
//! assert!(!err.is_transient());
//! assert!(err.to_string().contains("some/repo"));
//! ```

use thiserror::Error;

/// Errors from preset resolution.
///
/// Messages always include the package name and, where relevant, the preset
/// name or file path attempted, so operators can locate a misconfiguration
/// without re-deriving it from logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresetError {
    /// The named file or nested key does not exist.
    #[error("preset not found: {0}")]
    NotFound(String),

    /// Content was fetched but is empty or not parseable as JSON.
    ///
    /// The display string always contains the phrase "invalid preset JSON"
    /// regardless of which provider produced the content.
    #[error("invalid preset JSON: {0}")]
    InvalidJson(String),

    /// The upstream host returned a server error or the transport failed.
    #[error("platform failure: {0}")]
    PlatformFailure(String),
}

impl PresetError {
    /// Check if this error means the preset is absent.
    ///
    /// Returns true only for [`PresetError::NotFound`]; the fallback chain
    /// advances to the next candidate on this kind and no other.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PresetError::NotFound(_))
    }

    /// Check if this error means fetched content was malformed.
    pub fn is_invalid_json(&self) -> bool {
        matches!(self, PresetError::InvalidJson(_))
    }

    /// Check if this error means the upstream host is unavailable.
    pub fn is_platform_failure(&self) -> bool {
        matches!(self, PresetError::PlatformFailure(_))
    }

    /// Check if this error indicates a transient failure that might succeed
    /// on retry.
    ///
    /// A missing preset or malformed file will not fix itself; only an
    /// upstream outage is worth retrying.
    pub fn is_transient(&self) -> bool {
        self.is_platform_failure()
    }
}
