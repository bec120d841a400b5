//! Injected version cache with TTL semantics.
//!
//! The cache is the only state that outlives a single prompt render. It is
//! passed into [`enabled`](crate::VersionDetector::enabled) explicitly; there
//! is no process-wide singleton. Entries are opaque strings:
//! `{executable}_version` holds the raw pre-parse command output and
//! `{executable}_version_url` the rendered changelog URL.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Cache key for the raw version string of an executable.
pub fn version_key(executable: &str) -> String {
    format!("{executable}_version")
}

/// Cache key for the rendered version URL of an executable.
pub fn version_url_key(executable: &str) -> String {
    format!("{executable}_version_url")
}

/// Get/set-with-TTL store consulted during version resolution.
///
/// Implementations take `&self` and own their concurrency safety; multiple
/// segments may probe the same cache during one render.
pub trait VersionCache: Send + Sync {
    /// Look up a live (non-expired) entry.
    fn get(&self, key: &str) -> Option<String>;

    /// Store an entry that expires after `ttl`.
    fn set(&self, key: &str, value: String, ttl: Duration);
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-process [`VersionCache`] with per-entry expiry.
///
/// Suitable for hosts that keep one process alive across renders; hosts that
/// fork per prompt need a persistent implementation of their own.
#[derive(Default)]
pub struct MemoryCache {
    data: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl VersionCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let entry = self.data.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.data.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        self.data.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }
}

/// A [`VersionCache`] that stores nothing and returns nothing.
pub struct NoCache;

impl VersionCache for NoCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: String, _ttl: Duration) {}
}
