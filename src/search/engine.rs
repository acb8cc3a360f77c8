//! Search engine orchestration
//!
//! Owns the corpus snapshot, inverted index, result cache, query expander,
//! and per-user context. Searches run against an immutable [`Arc`] snapshot;
//! [`SearchEngine::refresh`] swaps in a fully-built replacement so concurrent
//! readers never see a torn index.

use crate::config::SearchConfig;
use crate::metrics;
use crate::models::{FaqRecord, SearchMatch};
use crate::search::cache::{cache_key, ResultCache};
use crate::search::context::ContextManager;
use crate::search::expand::QueryExpander;
use crate::search::index::InvertedIndex;
use crate::search::normalize;
use crate::search::score::score;
use crate::storage::FaqStore;
use chrono::Duration;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use validator::Validate;

/// Immutable view of the loaded corpus and its index.
///
/// The epoch identifies which refresh produced the snapshot; cache entries
/// are tagged with it so results scored against a retired corpus are never
/// served after a swap.
struct CorpusSnapshot {
    epoch: u64,
    records: BTreeMap<i64, FaqRecord>,
    index: InvertedIndex,
}

impl CorpusSnapshot {
    fn empty() -> Self {
        Self {
            epoch: 0,
            records: BTreeMap::new(),
            index: InvertedIndex::default(),
        }
    }

    /// Build a snapshot, quarantining malformed rows
    fn build(rows: Vec<FaqRecord>, epoch: u64) -> Self {
        let mut records = BTreeMap::new();

        for mut row in rows {
            row.prepare();
            if let Err(e) = row.validate() {
                tracing::warn!(faq_id = row.id, error = %e, "Quarantined malformed FAQ row");
                continue;
            }
            if records.insert(row.id, row).is_some() {
                tracing::warn!("Duplicate FAQ id replaced during load");
            }
        }

        let index = InvertedIndex::build(records.values());
        Self {
            epoch,
            records,
            index,
        }
    }
}

/// Engine-local counters, observable without a metrics scrape
#[derive(Default)]
pub struct SearchStats {
    searches: AtomicU64,
    hits: AtomicU64,
    cache_hits: AtomicU64,
    context_assisted: AtomicU64,
    scorer_calls: AtomicU64,
}

/// Point-in-time copy of [`SearchStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub searches: u64,
    pub hits: u64,
    pub cache_hits: u64,
    pub context_assisted: u64,
    pub scorer_calls: u64,
}

impl SearchStats {
    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            searches: self.searches.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            context_assisted: self.context_assisted.load(Ordering::Relaxed),
            scorer_calls: self.scorer_calls.load(Ordering::Relaxed),
        }
    }
}

/// FAQ search engine
pub struct SearchEngine {
    config: SearchConfig,
    store: Arc<dyn FaqStore>,
    snapshot: RwLock<Arc<CorpusSnapshot>>,
    // Monotonic refresh counter; each built snapshot gets the next value
    epochs: AtomicU64,
    cache: ResultCache,
    expander: QueryExpander,
    context: ContextManager,
    stats: SearchStats,
}

impl SearchEngine {
    /// Create an engine and attempt the initial corpus load.
    ///
    /// A failed load is not fatal: the engine starts with an empty corpus
    /// (observable via [`SearchEngine::record_count`]) and a later
    /// [`SearchEngine::refresh`] can recover.
    pub async fn new(config: SearchConfig, store: Arc<dyn FaqStore>) -> Self {
        let engine = Self {
            cache: ResultCache::new(config.cache_capacity),
            context: ContextManager::new(
                config.context_depth,
                Duration::seconds(config.context_ttl_secs as i64),
            ),
            expander: QueryExpander::new(),
            snapshot: RwLock::new(Arc::new(CorpusSnapshot::empty())),
            epochs: AtomicU64::new(0),
            stats: SearchStats::default(),
            store,
            config,
        };
        engine.refresh().await;
        engine
    }

    /// Find the best-matching FAQ record for a free-text query.
    ///
    /// The direct attempt (cache, expansion, index lookup, scoring) runs
    /// first. If it yields nothing and `user_id` identifies a real user, the
    /// most recent context query is prefixed and the attempt repeats on the
    /// combined string. Any hit is appended to the user's context and the
    /// record's usage counter is persisted fire-and-forget.
    pub async fn search(&self, query: &str, user_id: i64) -> Option<SearchMatch> {
        self.stats.searches.fetch_add(1, Ordering::Relaxed);
        metrics::FAQ_SEARCHES_TOTAL.inc();

        let snapshot = Arc::clone(&self.snapshot.read());

        let mut assisted = false;
        let mut result = self.direct_search(query, &snapshot);

        if result.is_none() && user_id > 0 {
            if let Some(previous) = self.context.recent(user_id).last() {
                let combined = format!("{} {}", previous.query, query);
                tracing::debug!(user_id, combined = %combined, "Retrying with context prefix");
                result = self.direct_search(&combined, &snapshot);
                assisted = result.is_some();
            }
        }

        if let Some(matched) = &result {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            metrics::FAQ_SEARCH_HITS.inc();
            if assisted {
                self.stats.context_assisted.fetch_add(1, Ordering::Relaxed);
                metrics::FAQ_CONTEXT_ASSISTED_HITS.inc();
            }

            if user_id > 0 {
                self.context.record(user_id, query, matched.clone());
            }

            // Fire-and-forget: a failed counter update never fails the reply
            let store = Arc::clone(&self.store);
            let faq_id = matched.faq_id;
            tokio::spawn(async move {
                if let Err(e) = store.increment_usage(faq_id).await {
                    tracing::warn!(faq_id, error = %e, "Failed to persist usage count");
                }
            });
        }

        result
    }

    /// One direct attempt: cache lookup, then expansion, index lookup,
    /// scoring, and threshold check. Accepted matches are cached.
    fn direct_search(&self, query: &str, snapshot: &CorpusSnapshot) -> Option<SearchMatch> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }

        let key = cache_key(trimmed);
        if let Some(cached) = self.cache.get(&key, snapshot.epoch) {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            metrics::FAQ_CACHE_HITS.inc();
            return Some(cached);
        }

        let tokens = normalize(trimmed);
        let expansions = self.expander.expand(trimmed);
        let candidates = snapshot.index.lookup(&tokens);

        let mut best: Option<(f64, &FaqRecord)> = None;
        // Ascending id order; first max wins ties
        for id in candidates {
            let Some(record) = snapshot.records.get(&id) else {
                continue;
            };
            self.stats.scorer_calls.fetch_add(1, Ordering::Relaxed);
            let value = score(trimmed, record, &expansions);
            if best.map_or(value > 0.0, |(top, _)| value > top) {
                best = Some((value, record));
            }
        }

        let (top, record) = best?;
        if top < self.config.score_threshold {
            tracing::debug!(query = %trimmed, top, "Best candidate below threshold");
            return None;
        }

        let matched = SearchMatch::from_record(record, top);
        self.cache.put(&key, snapshot.epoch, matched.clone());
        Some(matched)
    }

    /// Reload the corpus wholesale and swap the snapshot atomically.
    ///
    /// The result cache is cleared; a search still running against the
    /// retired snapshot may write its result afterwards, but the entry is
    /// tagged with the old epoch and never served against the new corpus.
    /// User context survives so in-flight conversations keep working. A
    /// failed load keeps the previous corpus.
    pub async fn refresh(&self) {
        match self.store.load_all().await {
            Ok(rows) => {
                let loaded = rows.len();
                let epoch = self.epochs.fetch_add(1, Ordering::Relaxed) + 1;
                let next = Arc::new(CorpusSnapshot::build(rows, epoch));
                let indexed = next.records.len();
                *self.snapshot.write() = next;
                self.cache.clear();
                metrics::FAQ_REFRESHES_TOTAL.inc();
                tracing::info!(loaded, indexed, "FAQ corpus refreshed");
            }
            Err(e) => {
                tracing::warn!(error = %e, "FAQ load failed; keeping previous corpus");
            }
        }
    }

    /// Number of records in the active corpus; zero signals a degraded state
    pub fn record_count(&self) -> usize {
        self.snapshot.read().records.len()
    }

    /// A record from the active corpus
    pub fn record(&self, id: i64) -> Option<FaqRecord> {
        self.snapshot.read().records.get(&id).cloned()
    }

    /// All known categories, sorted
    pub fn categories(&self) -> Vec<String> {
        self.snapshot.read().index.categories()
    }

    /// Records filed under a category
    pub fn records_in_category(&self, category: &str) -> Vec<FaqRecord> {
        let snapshot = self.snapshot.read();
        snapshot
            .index
            .records_in_category(category)
            .into_iter()
            .filter_map(|id| snapshot.records.get(&id).cloned())
            .collect()
    }

    /// Engine counters
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
