//! Bounded memoization of accepted search results

use crate::models::SearchMatch;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};

/// Short hash key for a query string: first 8 hex characters of a SHA-256
/// digest of the trimmed, lowercased query. Collisions are negligible at
/// this corpus scale.
pub fn cache_key(query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.trim().to_lowercase().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..8].to_string()
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, (u64, SearchMatch)>,
    // Insertion order, oldest first; eviction is FIFO, not strict LRU
    order: VecDeque<String>,
}

/// Result cache, bounded by entry count with insertion-order eviction.
///
/// Only matches that cleared the relevance threshold are stored, so a corpus
/// refresh can immediately surface previously-unmatched queries.
///
/// Entries carry the epoch of the corpus snapshot they were scored against.
/// A `get` only returns entries from the requested epoch, so a write that
/// lands after a refresh has cleared the cache is never served against the
/// new corpus.
pub struct ResultCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn get(&self, key: &str, epoch: u64) -> Option<SearchMatch> {
        let inner = self.inner.lock();
        match inner.entries.get(key) {
            Some((entry_epoch, matched)) if *entry_epoch == epoch => Some(matched.clone()),
            _ => None,
        }
    }

    pub fn put(&self, key: &str, epoch: u64, matched: SearchMatch) {
        let mut inner = self.inner.lock();

        if inner
            .entries
            .insert(key.to_string(), (epoch, matched))
            .is_some()
        {
            // Existing key keeps its slot in the eviction order
            return;
        }
        inner.order.push_back(key.to_string());

        while inner.entries.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
