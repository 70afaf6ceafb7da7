//! Time-bounded cache for related-document rankings.
//!
//! An explicitly constructed service rather than a process-wide map: the
//! server shares one instance behind `Arc`, tests create their own. Entries
//! move Fresh → Expired → Evicted; expiry is detected lazily on `get`, and a
//! capacity-triggered sweep after `set` evicts everything already expired.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::RelatedDocument;

/// Number of entries above which a `set` triggers an expiry sweep.
const DEFAULT_SWEEP_THRESHOLD: usize = 100;

struct CacheEntry {
    data: Vec<RelatedDocument>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) > self.ttl
    }
}

/// In-memory TTL cache keyed by normalized document path.
pub struct RelatedCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
    sweep_threshold: usize,
}

impl RelatedCache {
    /// Create a cache whose entries expire after `default_ttl`.
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_sweep_threshold(default_ttl, DEFAULT_SWEEP_THRESHOLD)
    }

    /// Create a cache with an explicit sweep threshold.
    #[must_use]
    pub fn with_sweep_threshold(default_ttl: Duration, sweep_threshold: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            sweep_threshold,
        }
    }

    /// Retrieve a fresh ranking, removing the entry if it has expired.
    pub fn get(&self, key: &str) -> Option<Vec<RelatedDocument>> {
        let mut entries = self.lock();
        let now = Instant::now();

        let expired = entries.get(key).is_some_and(|e| e.is_expired(now));
        if expired {
            entries.remove(key);
            tracing::debug!(key, "Cache entry expired");
            return None;
        }
        entries.get(key).map(|e| e.data.clone())
    }

    /// Store a ranking with the default TTL, overwriting any existing entry.
    pub fn set(&self, key: impl Into<String>, data: Vec<RelatedDocument>) {
        self.set_with_ttl(key, data, self.default_ttl);
    }

    /// Store a ranking with an explicit TTL, overwriting any existing entry.
    pub fn set_with_ttl(&self, key: impl Into<String>, data: Vec<RelatedDocument>, ttl: Duration) {
        let mut entries = self.lock();
        entries.insert(
            key.into(),
            CacheEntry {
                data,
                stored_at: Instant::now(),
                ttl,
            },
        );
        if entries.len() > self.sweep_threshold {
            let now = Instant::now();
            let before = entries.len();
            entries.retain(|_, e| !e.is_expired(now));
            tracing::debug!(evicted = before - entries.len(), "Cache sweep");
        }
    }

    /// Number of stored entries, including not-yet-detected expired ones.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
