//! # faq-engine
//!
//! In-memory search core for an HR FAQ-answering bot. Free-text questions are
//! matched against a curated corpus of question/answer records; the best
//! match above a configured relevance threshold is returned together with its
//! score. The transport layer (Telegram/HTTP), command dispatch, and admin
//! tooling live outside this crate and talk to it through [`search::SearchEngine`]
//! and the [`storage::FaqStore`] trait.
//!
//! # Example
//!
//! ```no_run
//! use faq_engine::config::SearchConfig;
//! use faq_engine::models::FaqRecord;
//! use faq_engine::search::SearchEngine;
//! use faq_engine::storage::InMemoryFaqStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(InMemoryFaqStore::with_records(vec![FaqRecord::new(
//!         1,
//!         "Как оформить отпуск?",
//!         "Подайте заявление за две недели.",
//!         "отпуск,оформление",
//!         "Кадры",
//!     )]));
//!
//!     let engine = SearchEngine::new(SearchConfig::default(), store).await;
//!
//!     if let Some(matched) = engine.search("отпуск", 42).await {
//!         println!("{} (score {:.1})", matched.answer, matched.score);
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod search;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
pub use models::{FaqRecord, SearchMatch};
pub use search::SearchEngine;
pub use storage::FaqStore;

/// Initialize tracing from the observability configuration
pub fn init_tracing(config: &config::ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("faq_engine={}", config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        let _ = registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init();
    } else {
        let _ = registry.with(tracing_subscriber::fmt::layer()).try_init();
    }
}
