//! Planner configuration, loaded from TOML.
//!
//! ```
//! use strips_planner::config::PlannerConfig;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     [search]
//!     max_expansions = 10000
//!
//!     [log]
//!     level = "debug"
//! "#).unwrap();
//!
//! assert_eq!(config.search.max_expansions, Some(10000));
//! assert_eq!(config.log.level, "debug");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Upper bound on expanded nodes. Unlimited when absent.
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default `tracing` filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    String::from("info")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.search.max_expansions = Some(limit);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_expansions == Some(0) {
            return Err(ConfigError::Invalid(String::from("search.max_expansions must be positive")));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Invalid(String::from("log.level must not be empty")));
        }
        Ok(())
    }
}
