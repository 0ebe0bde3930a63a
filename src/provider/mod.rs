//! provider
//!
//! Adapters for remote hosting providers (GitHub, GitLab).
//!
//! # Architecture
//!
//! The [`PresetProvider`] trait defines the fetch contract; one adapter
//! module exists per hosting API. The resolver is written against the trait
//! and selects an adapter via [`create_provider`] or
//! [`create_provider_by_name`] rather than importing implementations
//! directly.
//!
//! # Modules
//!
//! - `traits`: Core [`PresetProvider`] trait and the raw-content types
//! - [`github`]: GitHub-style adapter (contents endpoint, base64 envelope)
//! - [`gitlab`]: GitLab-style adapter (branch discovery, raw file fetch)
//! - [`mock`]: In-memory implementation for deterministic testing
//! - `factory`: Provider selection and creation

mod factory;
pub mod github;
pub mod gitlab;
pub mod mock;
mod traits;

pub use factory::{
    create_provider, create_provider_by_name, valid_provider_names, ProviderKind,
};
pub use traits::*;
