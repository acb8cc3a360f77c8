//! Prometheus metrics for the FAQ engine.
//!
//! Counters work before registration, so the engine can increment them
//! unconditionally; call [`init_metrics`] once at startup to expose them
//! through [`PROMETHEUS_REGISTRY`].

use crate::error::{AppError, Result};
use lazy_static::lazy_static;
use prometheus::{Counter, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    /// Total number of search calls
    pub static ref FAQ_SEARCHES_TOTAL: Counter = Counter::with_opts(
        Opts::new("faq_searches_total", "Total number of search calls").namespace("faq_engine")
    )
    .expect("Failed to create FAQ_SEARCHES_TOTAL metric");

    /// Searches that returned a match
    pub static ref FAQ_SEARCH_HITS: Counter = Counter::with_opts(
        Opts::new("faq_search_hits", "Searches that returned a match").namespace("faq_engine")
    )
    .expect("Failed to create FAQ_SEARCH_HITS metric");

    /// Matches served from the result cache
    pub static ref FAQ_CACHE_HITS: Counter = Counter::with_opts(
        Opts::new("faq_cache_hits", "Matches served from the result cache")
            .namespace("faq_engine")
    )
    .expect("Failed to create FAQ_CACHE_HITS metric");

    /// Matches found only via the context-assisted retry
    pub static ref FAQ_CONTEXT_ASSISTED_HITS: Counter = Counter::with_opts(
        Opts::new(
            "faq_context_assisted_hits",
            "Matches found only via the context-assisted retry"
        )
        .namespace("faq_engine")
    )
    .expect("Failed to create FAQ_CONTEXT_ASSISTED_HITS metric");

    /// Completed corpus refreshes
    pub static ref FAQ_REFRESHES_TOTAL: Counter = Counter::with_opts(
        Opts::new("faq_refreshes_total", "Completed corpus refreshes").namespace("faq_engine")
    )
    .expect("Failed to create FAQ_REFRESHES_TOTAL metric");
}

/// Register all metrics with the global registry
pub fn init_metrics() -> Result<()> {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(FAQ_SEARCHES_TOTAL.clone()),
        Box::new(FAQ_SEARCH_HITS.clone()),
        Box::new(FAQ_CACHE_HITS.clone()),
        Box::new(FAQ_CONTEXT_ASSISTED_HITS.clone()),
        Box::new(FAQ_REFRESHES_TOTAL.clone()),
    ];

    for collector in collectors {
        if let Err(e) = PROMETHEUS_REGISTRY.register(collector) {
            match e {
                prometheus::Error::AlreadyReg => {}
                other => {
                    return Err(AppError::Internal(format!(
                        "Failed to register metric: {}",
                        other
                    )))
                }
            }
        }
    }

    Ok(())
}
