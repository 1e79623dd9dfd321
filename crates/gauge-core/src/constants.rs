/// context-gauge version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Characters per token assumed by the fallback estimator.
pub const FALLBACK_CHARS_PER_TOKEN: usize = 4;

/// Usage ratio above which the indicator leaves the normal tier.
pub const WARNING_THRESHOLD: f64 = 0.7;

/// Usage ratio above which the indicator enters the critical tier.
pub const CRITICAL_THRESHOLD: f64 = 0.9;

/// Usage ratio at which the context window is considered full.
pub const OVERFLOW_THRESHOLD: f64 = 1.0;
