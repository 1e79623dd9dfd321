//! Configuration for every subsystem, loaded from TOML with environment overrides.

pub mod bridge_config;
pub mod cache_config;
pub mod defaults;
pub mod observability_config;
pub mod scheduler_config;
pub mod tokens_config;
pub mod usage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use bridge_config::BridgeConfig;
pub use cache_config::CacheConfig;
pub use observability_config::ObservabilityConfig;
pub use scheduler_config::SchedulerConfig;
pub use tokens_config::TokensConfig;
pub use usage_config::UsageConfig;

use crate::errors::ConfigError;
use crate::models::EncodingId;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`GAUGE_*`)
/// 2. TOML file
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub tokens: TokensConfig,
    pub bridge: BridgeConfig,
    pub cache: CacheConfig,
    pub scheduler: SchedulerConfig,
    pub usage: UsageConfig,
    pub observability: ObservabilityConfig,
}

impl GaugeConfig {
    /// Load configuration from a TOML file, then apply `GAUGE_*` overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: GaugeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Environment is not consulted.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: GaugeConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = lookup("GAUGE_REQUEST_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.bridge.request_timeout_ms = ms;
        }
        if let Some(encoding) = lookup("GAUGE_DEFAULT_ENCODING").and_then(|v| EncodingId::parse(&v))
        {
            self.tokens.default_encoding = encoding;
        }
        if let Some(level) = lookup("GAUGE_LOG_LEVEL") {
            self.observability.log_level = level;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bridge.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "bridge.request_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.cache.retain_entries > self.cache.max_entries {
            return Err(ConfigError::ValidationFailed {
                field: "cache.retain_entries".to_string(),
                message: "must not exceed cache.max_entries".to_string(),
            });
        }
        if self.cache.key_prefix_chars == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "cache.key_prefix_chars".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.scheduler.mutation_debounce_ms == 0 || self.scheduler.input_debounce_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "scheduler".to_string(),
                message: "debounce windows must be greater than 0".to_string(),
            });
        }
        if self.scheduler.discovery_interval_ms == 0 || self.scheduler.navigation_poll_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "scheduler".to_string(),
                message: "polling intervals must be greater than 0".to_string(),
            });
        }
        if self.usage.unbounded_max_tokens == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "usage.unbounded_max_tokens".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
