//! In-process cache of the last known-good joke list
//!
//! One entry, replaced wholesale on every successful fetch and never merged.
//! Freshness is judged against the clock on each read; nothing expires the
//! entry in the background, and an expired entry stays available for
//! fallback via [`JokeCache::peek`].

use crate::models::Joke;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default time a cached list is eligible for cache hits
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Snapshot of the cache entry
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Arc<Vec<Joke>>,
    pub last_updated: Option<Instant>,
    pub valid: bool,
}

impl CacheEntry {
    fn empty() -> Self {
        Self {
            data: Arc::new(Vec::new()),
            last_updated: None,
            valid: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Time since the last successful update
    pub fn age(&self) -> Option<Duration> {
        self.last_updated.map(|at| at.elapsed())
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.valid && self.age().map_or(false, |age| age < ttl)
    }
}

/// Shared cache store
pub struct JokeCache {
    entry: RwLock<CacheEntry>,
    ttl: Duration,
}

impl JokeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(CacheEntry::empty()),
            ttl,
        }
    }

    /// True iff the entry is valid and younger than the TTL
    pub fn is_valid(&self) -> bool {
        self.entry.read().is_fresh(self.ttl)
    }

    /// Cached data if it is still fresh
    ///
    /// Checks freshness and reads the data under one lock, so a concurrent
    /// update cannot slip in between the two.
    pub fn fresh(&self) -> Option<Arc<Vec<Joke>>> {
        let entry = self.entry.read();
        entry.is_fresh(self.ttl).then(|| Arc::clone(&entry.data))
    }

    /// Replace the entry with `data`, stamped now
    pub fn update(&self, data: Vec<Joke>) -> Arc<Vec<Joke>> {
        let data = Arc::new(data);
        let replacement = CacheEntry {
            data: Arc::clone(&data),
            last_updated: Some(Instant::now()),
            valid: true,
        };

        *self.entry.write() = replacement;
        debug!(count = data.len(), "Joke cache updated");
        data
    }

    /// Current entry regardless of freshness
    pub fn peek(&self) -> CacheEntry {
        self.entry.read().clone()
    }
}

impl Default for JokeCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
