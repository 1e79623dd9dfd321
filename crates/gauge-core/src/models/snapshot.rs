use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Presentation bucket for a usage ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum UsageTier {
    Normal,
    Warning,
    Critical,
    Overflow,
}

impl UsageTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageTier::Normal => "normal",
            UsageTier::Warning => "warning",
            UsageTier::Critical => "critical",
            UsageTier::Overflow => "overflow",
        }
    }
}

/// Complete state handed to the presentation layer.
///
/// Always replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UsageSnapshot {
    #[ts(type = "number")]
    pub current_tokens: u64,
    #[ts(type = "number")]
    pub max_tokens: u64,
    /// `current_tokens / max_tokens`, unclamped.
    pub percentage: f64,
    pub tier: UsageTier,
    /// The conversation is still populating; counts must not be shown.
    pub is_loading: bool,
    /// Overflow visual attribute.
    pub flashing: bool,
    /// At least one count came from the fallback estimator.
    pub estimated: bool,
}

impl UsageSnapshot {
    /// Tokens left before the window is full.
    pub fn remaining_tokens(&self) -> u64 {
        self.max_tokens.saturating_sub(self.current_tokens)
    }
}
