//! TokenCache — fingerprint-keyed exact token counts for one session.
//!
//! Bounded by insertion order: once the cache grows past `max_entries`, only
//! the `retain_entries` most recently inserted keys survive.

use std::collections::{HashMap, VecDeque};

use gauge_core::config::CacheConfig;
use gauge_core::models::Role;

/// Per-session map from fragment fingerprint to its exact token count.
#[derive(Debug, Clone)]
pub struct TokenCache {
    entries: HashMap<String, usize>,
    order: VecDeque<String>,
    max_entries: usize,
    retain_entries: usize,
}

impl TokenCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_bounds(config.max_entries, config.retain_entries)
    }

    /// `retain_entries` is clamped to `max_entries`.
    pub fn with_bounds(max_entries: usize, retain_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries,
            retain_entries: retain_entries.min(max_entries),
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries.get(key).copied()
    }

    /// Insert or update a count. Updating keeps the key's insertion position.
    pub fn put(&mut self, key: String, count: usize) {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = count;
            return;
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, count);

        if self.entries.len() > self.max_entries {
            self.prune();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn prune(&mut self) {
        while self.order.len() > self.retain_entries {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

/// Cache key for a fragment: blake3 over the role and the first
/// `prefix_chars` characters of its text.
///
/// Fragments sharing role and prefix collide on purpose.
pub fn fingerprint(role: Role, text: &str, prefix_chars: usize) -> String {
    let prefix = match text.char_indices().nth(prefix_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    };

    let mut hasher = blake3::Hasher::new();
    hasher.update(role.as_str().as_bytes());
    hasher.update(&[0]);
    hasher.update(prefix.as_bytes());
    hasher.finalize().to_hex().to_string()
}
