//! preset-resolver - Remote preset resolution for shared configuration
//!
//! Resolves named "presets" (reusable configuration fragments) by fetching
//! a JSON document from a remote hosting provider and navigating into it
//! with a slashed path. A reference like `owner/repo:presetName/subName`
//! lets users point at shared configuration instead of duplicating it.
//!
//! # Architecture
//!
//! The crate is layered leaves-first:
//!
//! - [`path`] - Preset name parsing and nested-value extraction (no I/O)
//! - [`decode`] - Raw provider payloads to JSON values
//! - [`provider`] - One fetch adapter per hosting API behind one trait
//! - [`resolver`] - Orchestration: fallback chain, decode, extraction
//! - [`credentials`] / [`cache`] - Injected collaborator ports
//!
//! # Error taxonomy
//!
//! Every failure is one of three kinds ([`PresetError`]): the preset does
//! not exist, the content is malformed, or the upstream host failed. The
//! distinction is load-bearing: fallback advances only on "not found", and
//! only host failures are worth retrying.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use preset_resolver::provider::github::GitHubProvider;
//! use preset_resolver::{PresetRequest, PresetResolver};
//!
//! # async fn example() -> Result<(), preset_resolver::PresetError> {
//! let resolver = PresetResolver::new(Arc::new(GitHubProvider::new()));
//! let request = PresetRequest::new("some/repo").with_preset_name("somefile/somename");
//! let preset = resolver.get_preset(&request).await?;
//! println!("{}", preset);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod credentials;
pub mod decode;
pub mod error;
pub mod path;
pub mod provider;
pub mod resolver;

pub use cache::{MemoryCache, NoopCache, PresetCache};
pub use credentials::{CredentialStore, StaticCredentialStore};
pub use error::PresetError;
pub use resolver::{PresetRequest, PresetResolver, FALLBACK_FILE_NAMES};
