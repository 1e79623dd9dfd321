use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::ModelLimit;

/// Usage classification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// Limit assumed when the adapter can only offer an unbounded estimate.
    pub unbounded_max_tokens: u64,
}

impl UsageConfig {
    /// Resolve an adapter-reported limit to a concrete token count.
    pub fn resolve_limit(&self, limit: ModelLimit) -> u64 {
        match limit {
            ModelLimit::Tokens(max) => max,
            ModelLimit::UnboundedEstimate => self.unbounded_max_tokens,
        }
    }
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            unbounded_max_tokens: defaults::DEFAULT_UNBOUNDED_MAX_TOKENS,
        }
    }
}
