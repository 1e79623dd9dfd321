use gauge_core::models::{Role, UsageTier};
use gauge_tracker::{classify, fingerprint, TokenCache};
use proptest::prelude::*;

fn tier_rank(tier: UsageTier) -> u8 {
    match tier {
        UsageTier::Normal => 0,
        UsageTier::Warning => 1,
        UsageTier::Critical => 2,
        UsageTier::Overflow => 3,
    }
}

proptest! {
    #[test]
    fn classify_is_idempotent(current in 0u64..1_000_000, max in 0u64..1_000_000) {
        prop_assert_eq!(classify(current, max), classify(current, max));
    }

    #[test]
    fn tier_never_cools_as_usage_grows(current in 0u64..500_000, extra in 0u64..500_000, max in 1u64..1_000_000) {
        let lower = classify(current, max);
        let higher = classify(current + extra, max);
        prop_assert!(tier_rank(higher.tier) >= tier_rank(lower.tier));
    }

    #[test]
    fn flashing_iff_overflow(current in 0u64..1_000_000, max in 0u64..1_000_000) {
        let snapshot = classify(current, max);
        prop_assert_eq!(snapshot.flashing, snapshot.tier == UsageTier::Overflow);
        prop_assert!(!snapshot.is_loading);
    }

    #[test]
    fn cache_never_exceeds_bound(count in 0usize..2_500) {
        let mut cache = TokenCache::default();
        for i in 0..count {
            cache.put(format!("key-{i}"), i);
        }
        prop_assert!(cache.len() <= 1_000);
        if count > 0 {
            let newest = format!("key-{}", count - 1);
            prop_assert_eq!(cache.get(&newest), Some(count - 1));
        }
    }

    #[test]
    fn fingerprint_ignores_text_past_prefix(prefix in "[a-z]{100}", a in ".{0,50}", b in ".{0,50}") {
        let left = format!("{prefix}{a}");
        let right = format!("{prefix}{b}");
        prop_assert_eq!(
            fingerprint(Role::Assistant, &left, 100),
            fingerprint(Role::Assistant, &right, 100)
        );
    }

    #[test]
    fn fingerprint_is_stable(text in ".{0,200}") {
        prop_assert_eq!(
            fingerprint(Role::User, &text, 100),
            fingerprint(Role::User, &text, 100)
        );
    }
}
