use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::ChangeSource;

/// Recalculation scheduler and discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Debounce applied to content mutation notifications.
    pub mutation_debounce_ms: u64,
    /// Debounce applied to typed input notifications.
    pub input_debounce_ms: u64,
    /// Delay between attempts to locate the observed region.
    pub discovery_interval_ms: u64,
    /// Attempts before discovery gives up.
    pub discovery_max_attempts: u32,
    /// Poll interval for conversation identity changes.
    pub navigation_poll_ms: u64,
}

impl SchedulerConfig {
    /// Debounce window for a notification source.
    pub fn debounce_for(&self, source: ChangeSource) -> Duration {
        match source {
            ChangeSource::Mutation => Duration::from_millis(self.mutation_debounce_ms),
            ChangeSource::Input => Duration::from_millis(self.input_debounce_ms),
        }
    }

    pub fn discovery_interval(&self) -> Duration {
        Duration::from_millis(self.discovery_interval_ms)
    }

    pub fn navigation_poll(&self) -> Duration {
        Duration::from_millis(self.navigation_poll_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            mutation_debounce_ms: defaults::DEFAULT_MUTATION_DEBOUNCE_MS,
            input_debounce_ms: defaults::DEFAULT_INPUT_DEBOUNCE_MS,
            discovery_interval_ms: defaults::DEFAULT_DISCOVERY_INTERVAL_MS,
            discovery_max_attempts: defaults::DEFAULT_DISCOVERY_MAX_ATTEMPTS,
            navigation_poll_ms: defaults::DEFAULT_NAVIGATION_POLL_MS,
        }
    }
}
