//! Per-user short-term conversational context

use crate::models::SearchMatch;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// One remembered (query, result) pair
#[derive(Debug, Clone, PartialEq)]
pub struct ContextEntry {
    pub query: String,
    pub matched: SearchMatch,
    pub at: DateTime<Utc>,
}

/// Retains each user's most recent successful searches for a bounded window.
///
/// Entries are pruned lazily on the next read or write for that user, both by
/// count and by age; a user whose list empties out is removed entirely.
pub struct ContextManager {
    entries: DashMap<i64, Vec<ContextEntry>>,
    depth: usize,
    ttl: Duration,
}

impl ContextManager {
    pub fn new(depth: usize, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            depth: depth.max(1),
            ttl,
        }
    }

    /// Append a successful search to the user's context
    pub fn record(&self, user_id: i64, query: &str, matched: SearchMatch) {
        let now = Utc::now();
        let mut list = self.entries.entry(user_id).or_default();

        list.retain(|entry| now - entry.at <= self.ttl);
        list.push(ContextEntry {
            query: query.to_string(),
            matched,
            at: now,
        });
        while list.len() > self.depth {
            list.remove(0);
        }
    }

    /// The user's retained context, most recent last
    pub fn recent(&self, user_id: i64) -> Vec<ContextEntry> {
        let now = Utc::now();

        let pruned = {
            let Some(mut list) = self.entries.get_mut(&user_id) else {
                return Vec::new();
            };
            list.retain(|entry| now - entry.at <= self.ttl);
            list.clone()
        };

        if pruned.is_empty() {
            // No empty placeholder retained
            self.entries.remove_if(&user_id, |_, list| list.is_empty());
        }
        pruned
    }

    /// Number of users with retained context
    pub fn user_count(&self) -> usize {
        self.entries.len()
    }
}
