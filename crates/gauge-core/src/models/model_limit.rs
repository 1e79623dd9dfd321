use serde::{Deserialize, Serialize};

/// Context window size reported by the page adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelLimit {
    /// The adapter resolved a concrete limit.
    Tokens(u64),
    /// The adapter could not resolve the model; use the configured estimate.
    UnboundedEstimate,
}
