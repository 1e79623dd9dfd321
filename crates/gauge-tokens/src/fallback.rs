use gauge_core::constants::FALLBACK_CHARS_PER_TOKEN;

/// Character-based token estimate: `ceil(chars / 4)`.
///
/// Used whenever the encoding service cannot answer. Never fails.
pub fn fallback_estimate(text: &str) -> usize {
    text.chars().count().div_ceil(FALLBACK_CHARS_PER_TOKEN)
}
