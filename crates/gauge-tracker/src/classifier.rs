//! Usage classification: `(current, max)` to a presentation tier.
//!
//! Pure and stateless. Boundary ratios belong to the cooler tier.

use gauge_core::constants::{CRITICAL_THRESHOLD, OVERFLOW_THRESHOLD, WARNING_THRESHOLD};
use gauge_core::models::{UsageSnapshot, UsageTier};

/// Tier for an unclamped usage ratio.
pub fn tier_for(percentage: f64) -> UsageTier {
    if percentage >= OVERFLOW_THRESHOLD {
        UsageTier::Overflow
    } else if percentage > CRITICAL_THRESHOLD {
        UsageTier::Critical
    } else if percentage > WARNING_THRESHOLD {
        UsageTier::Warning
    } else {
        UsageTier::Normal
    }
}

/// Classify a settled count against the window size.
///
/// A zero-sized window reports a ratio of 1.0 (overflow) as soon as anything
/// is in it, keeping the snapshot JSON-representable.
pub fn classify(current_tokens: u64, max_tokens: u64) -> UsageSnapshot {
    let percentage = if max_tokens == 0 {
        if current_tokens == 0 {
            0.0
        } else {
            OVERFLOW_THRESHOLD
        }
    } else {
        current_tokens as f64 / max_tokens as f64
    };
    let tier = tier_for(percentage);

    UsageSnapshot {
        current_tokens,
        max_tokens,
        percentage,
        tier,
        is_loading: false,
        flashing: tier == UsageTier::Overflow,
        estimated: false,
    }
}

/// Snapshot shown while a conversation is still populating.
pub fn loading_snapshot(max_tokens: u64) -> UsageSnapshot {
    UsageSnapshot {
        current_tokens: 0,
        max_tokens,
        percentage: 0.0,
        tier: UsageTier::Normal,
        is_loading: true,
        flashing: false,
        estimated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_go_to_cooler_tier() {
        assert_eq!(tier_for(0.0), UsageTier::Normal);
        assert_eq!(tier_for(0.70), UsageTier::Normal);
        assert_eq!(tier_for(0.700_000_01), UsageTier::Warning);
        assert_eq!(tier_for(0.90), UsageTier::Warning);
        assert_eq!(tier_for(0.900_001), UsageTier::Critical);
        assert_eq!(tier_for(0.999_999), UsageTier::Critical);
        assert_eq!(tier_for(1.0), UsageTier::Overflow);
        assert_eq!(tier_for(3.5), UsageTier::Overflow);
    }

    #[test]
    fn zero_window() {
        let empty = classify(0, 0);
        assert_eq!(empty.tier, UsageTier::Normal);
        assert_eq!(empty.percentage, 0.0);

        let full = classify(1, 0);
        assert_eq!(full.tier, UsageTier::Overflow);
        assert_eq!(full.percentage, 1.0);
        assert!(full.flashing);
    }
}
