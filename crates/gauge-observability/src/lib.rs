//! # gauge-observability
//!
//! Structured tracing with span definitions and event helpers, plus lock-free
//! counters for the usage-tracking pipeline.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{MetricsSnapshot, PipelineMetrics};
