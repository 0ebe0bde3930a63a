//! cache
//!
//! Cache port for resolved preset files.
//!
//! The resolver memoizes decoded file contents keyed by a URL-like string
//! (`provider:endpoint:repo:file`). Caching is strictly an efficiency
//! concern: the resolver is correct with [`NoopCache`], and any impl must
//! tolerate concurrent use from in-flight resolutions for different
//! repositories.
//!
//! [`MemoryCache`] covers the per-run memoization tier. A longer-lived
//! cross-run cache can implement the same trait in the embedding
//! application; `clear` exists so such a cache can expose explicit
//! invalidation.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

/// Cache of decoded preset file contents, keyed by exact fetch location.
pub trait PresetCache: Send + Sync {
    /// Look up a previously stored value.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store a value. Called only after a fully successful fetch + decode,
    /// so a cancelled resolution never leaves partial state behind.
    fn set(&self, key: &str, value: Value);

    /// Drop all stored values.
    fn clear(&self);
}

/// A cache that stores nothing.
///
/// The default for [`PresetResolver::new`](crate::resolver::PresetResolver::new).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl PresetCache for NoopCache {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    fn set(&self, _key: &str, _value: Value) {}

    fn clear(&self) {}
}

/// In-memory per-run memoization cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Check whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PresetCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key.to_string(), value);
    }

    fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }
}
