use serde::{Deserialize, Serialize};

use super::defaults;

/// Token cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Size above which the cache is pruned.
    pub max_entries: usize,
    /// Number of most recently inserted entries kept after pruning.
    pub retain_entries: usize,
    /// Number of leading characters of a fragment that feed its fingerprint.
    pub key_prefix_chars: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
            retain_entries: defaults::DEFAULT_CACHE_RETAIN_ENTRIES,
            key_prefix_chars: defaults::DEFAULT_KEY_PREFIX_CHARS,
        }
    }
}
