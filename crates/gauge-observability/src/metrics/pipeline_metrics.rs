//! Lock-free counters shared by the bridge and every session.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for the usage-tracking pipeline.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    passes_completed: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    exact_counts: AtomicU64,
    fallback_counts: AtomicU64,
    timeouts: AtomicU64,
    sessions_started: AtomicU64,
    discovery_failures: AtomicU64,
}

/// Point-in-time copy of [`PipelineMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub passes_completed: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub exact_counts: u64,
    pub fallback_counts: u64,
    pub timeouts: u64,
    pub sessions_started: u64,
    pub discovery_failures: u64,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&self) {
        self.passes_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_lookups(&self, hits: u64, misses: u64) {
        self.cache_hits.fetch_add(hits, Ordering::Relaxed);
        self.cache_misses.fetch_add(misses, Ordering::Relaxed);
    }

    pub fn record_exact(&self) {
        self.exact_counts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallback_counts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session(&self) {
        self.sessions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_discovery_failure(&self) {
        self.discovery_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            passes_completed: self.passes_completed.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            exact_counts: self.exact_counts.load(Ordering::Relaxed),
            fallback_counts: self.fallback_counts.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            sessions_started: self.sessions_started.load(Ordering::Relaxed),
            discovery_failures: self.discovery_failures.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSnapshot {
    /// Cache hit rate (0.0–1.0). Zero when nothing was looked up.
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_is_zero_without_lookups() {
        assert_eq!(MetricsSnapshot::default().cache_hit_rate(), 0.0);
    }

    #[test]
    fn counters_accumulate() {
        let metrics = PipelineMetrics::new();
        metrics.record_cache_lookups(3, 1);
        metrics.record_cache_lookups(1, 3);
        metrics.record_fallback();
        metrics.record_pass();
        let snap = metrics.snapshot();
        assert_eq!(snap.cache_hits, 4);
        assert_eq!(snap.cache_misses, 4);
        assert_eq!(snap.fallback_counts, 1);
        assert_eq!(snap.passes_completed, 1);
        assert!((snap.cache_hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
