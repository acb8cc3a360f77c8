use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search engine configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Storage backend configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: FAQ_ENGINE_)
            .add_source(
                config::Environment::with_prefix("FAQ_ENGINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            storage: StorageConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Search engine tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum relevance score for a candidate to be accepted as an answer.
    /// A candidate scoring exactly 0.0 has no overlap with the query and is
    /// never accepted, even with a 0.0 threshold.
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,

    /// Maximum number of cached search results
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Number of (query, result) pairs retained per user
    #[serde(default = "default_context_depth")]
    pub context_depth: usize,

    /// Age bound for retained context entries (seconds)
    #[serde(default = "default_context_ttl")]
    pub context_ttl_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            score_threshold: default_score_threshold(),
            cache_capacity: default_cache_capacity(),
            context_depth: default_context_depth(),
            context_ttl_secs: default_context_ttl(),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Storage backend type
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path for the embedded database (sled)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub prometheus_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            prometheus_enabled: default_true(),
        }
    }
}

// Default value functions
fn default_score_threshold() -> f64 {
    2.0
}

fn default_cache_capacity() -> usize {
    1000
}

fn default_context_depth() -> usize {
    3
}

fn default_context_ttl() -> u64 {
    86_400 // 24 hours
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SearchConfig::default();
        assert_eq!(config.score_threshold, 2.0);
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.context_depth, 3);
        assert_eq!(config.context_ttl_secs, 86_400);
    }

    #[test]
    fn test_storage_backend_default() {
        assert_eq!(StorageBackend::default(), StorageBackend::Memory);
    }
}
