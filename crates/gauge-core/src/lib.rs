//! # gauge-core
//!
//! Foundation crate for the context-gauge usage tracker.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GaugeConfig;
pub use errors::{GaugeError, GaugeResult};
pub use models::{
    ChangeSource, EncodingId, MessageFragment, ModelLimit, Role, UsageSnapshot, UsageTier,
};
pub use traits::{ChangeStream, FnSink, PageAdapter, SnapshotSink};
