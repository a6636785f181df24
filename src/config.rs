//! Scope configuration.
//!
//! Defaults, an optional configuration file (TOML, YAML or JSON, picked by
//! extension) and `MODEL_SCOPES_*` environment variables are layered with the
//! `config` crate, later sources winning.

use crate::error::{Result, ScopeError};
use crate::scopes::{parse_sort_sequence, SortAttribute, SortSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub const ENV_PREFIX: &str = "MODEL_SCOPES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Charset used for character counting and lowercasing; only UTF-8 is supported
    pub charset: String,
    /// Fuzzy-filter values shorter than this many characters are ignored
    pub min_like_length: usize,
    pub driver_cache_ttl_seconds: u64,
    /// Sort settings for entities that declare none
    pub default_sort: SortSettingsConfig,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            charset: "UTF-8".to_string(),
            min_like_length: 2,
            driver_cache_ttl_seconds: 60,
            default_sort: SortSettingsConfig::default(),
        }
    }
}

/// Declarative form of [`SortSettings`] with literal columns only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettingsConfig {
    pub attributes: Vec<String>,
    /// Sort sequence such as `"-created_at,id"`
    pub default_order: String,
}

impl Default for SortSettingsConfig {
    fn default() -> Self {
        Self {
            attributes: vec!["id".to_string()],
            default_order: "id".to_string(),
        }
    }
}

impl SortSettingsConfig {
    pub fn to_sort_settings(&self) -> SortSettings {
        SortSettings {
            attributes: self
                .attributes
                .iter()
                .map(|column| SortAttribute::Column(column.clone()))
                .collect(),
            default_order: parse_sort_sequence(Some(&self.default_order)),
        }
    }
}

impl ScopeConfig {
    /// Short cache lifetimes for test suites
    pub fn for_test() -> Self {
        Self {
            driver_cache_ttl_seconds: 1,
            ..Self::default()
        }
    }

    /// Load defaults, then `path` (if any), then `MODEL_SCOPES_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    pub(crate) fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            info!(path = %path.display(), "Loading scope configuration file");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: ScopeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn driver_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.driver_cache_ttl_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        let charset = self.charset.to_lowercase().replace('-', "");
        if charset != "utf8" {
            return Err(ScopeError::Configuration(format!(
                "Unsupported charset: {} (only UTF-8 is supported)",
                self.charset
            )));
        }

        if self.driver_cache_ttl_seconds == 0 {
            return Err(ScopeError::Configuration(
                "Driver cache TTL must be greater than 0".to_string(),
            ));
        }

        if self.min_like_length == 0 {
            warn!("min_like_length is 0 - every string value reaches the fuzzy filter");
        }

        Ok(())
    }
}
