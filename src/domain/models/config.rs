use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default name the side channel is registered under on a wait-enhanced store
pub const DEFAULT_STORE_NAME: &str = "wait_store";

/// Main configuration structure for Settle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Convergence loop configuration
    #[serde(default)]
    pub convergence: ConvergenceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Convergence loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConvergenceConfig {
    /// Maximum number of callback invocations per run.
    ///
    /// Values below 2 never wait for pending work.
    #[serde(default = "default_round_limit")]
    pub round_limit: u32,

    /// Name the side channel is looked up under on the store
    #[serde(default = "default_store_name")]
    pub store_name: String,
}

/// Lowest round limit that awaits anything
pub const MIN_USEFUL_ROUND_LIMIT: u32 = 2;

const fn default_round_limit() -> u32 {
    MIN_USEFUL_ROUND_LIMIT
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

impl ConvergenceConfig {
    pub fn with_round_limit(mut self, round_limit: u32) -> Self {
        self.round_limit = round_limit;
        self
    }

    pub fn with_store_name(mut self, store_name: impl Into<String>) -> Self {
        self.store_name = store_name.into();
        self
    }
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            round_limit: default_round_limit(),
            store_name: default_store_name(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
