use gauge_tokens::fallback_estimate;
use proptest::prelude::*;

proptest! {
    #[test]
    fn estimate_is_ceil_of_quarter_chars(s in ".{0,400}") {
        let chars = s.chars().count();
        let estimate = fallback_estimate(&s);
        prop_assert_eq!(estimate, (chars + 3) / 4);
    }

    #[test]
    fn estimate_never_decreases_on_append(a in ".{0,100}", b in ".{0,100}") {
        let combined = format!("{}{}", a, b);
        prop_assert!(fallback_estimate(&combined) >= fallback_estimate(&a));
    }

    #[test]
    fn estimate_is_subadditive(a in ".{0,100}", b in ".{0,100}") {
        let combined = format!("{}{}", a, b);
        prop_assert!(fallback_estimate(&combined) <= fallback_estimate(&a) + fallback_estimate(&b));
    }

    #[test]
    fn non_empty_text_costs_at_least_one_token(s in ".{1,50}") {
        prop_assert!(fallback_estimate(&s) >= 1);
    }
}
