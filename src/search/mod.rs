//! In-memory FAQ search engine
//!
//! This module implements the matching core of the FAQ bot:
//!
//! - **Query Normalization**: lowercasing, punctuation stripping, tokenization
//! - **Query Expansion**: typo correction and synonym substitution from fixed tables
//! - **Inverted Index**: keyword and question-token postings over the FAQ corpus
//! - **Relevance Scoring**: additive keyword/substring scoring with an
//!   exact-match short circuit
//! - **Result Caching**: bounded memoization of accepted matches
//! - **Conversational Context**: per-user short-term history used to retry a
//!   failed search with the previous query prefixed
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              SearchEngine API                    │
//! ├─────────────────────────────────────────────────┤
//! │  - search(query, user_id)   - refresh()         │
//! │  - categories()             - record_count()    │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │           Corpus Snapshot (Arc-swapped)          │
//! ├─────────────────────────────────────────────────┤
//! │  - FaqRecord map (by id)                         │
//! │  - Inverted Index (keywords, question tokens)   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Searches run against an immutable snapshot; [`SearchEngine::refresh`]
//! builds a replacement off-lock and swaps it in atomically, so concurrent
//! readers never observe a half-built index.

mod cache;
mod context;
mod engine;
mod expand;
mod index;
mod normalize;
mod score;

pub use cache::{cache_key, ResultCache};
pub use context::{ContextEntry, ContextManager};
pub use engine::{SearchEngine, SearchStats, StatsSnapshot};
pub use expand::QueryExpander;
pub use index::InvertedIndex;
pub use normalize::normalize;
pub use score::{score, EXACT_MATCH_SCORE};
