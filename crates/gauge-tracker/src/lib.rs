//! # gauge-tracker
//!
//! Incremental context-window usage tracking.
//!
//! ```text
//! PageAdapter ──changes──▶ session actor ──debounce──▶ pass
//!                                                       │
//!     TokenCache ◀──exact counts── RequestBridge ◀──misses
//!                                                       │
//!             SnapshotSink ◀── classify / loading ◀─────┘
//! ```
//!
//! [`UsageTracker`] keeps one session per conversation identity and resets
//! on navigation.

pub mod cache;
pub mod classifier;
pub mod context;
pub mod controller;
mod gate;
pub mod lifecycle;
pub mod navigation;
pub mod scheduler;
mod session;

pub use cache::{fingerprint, TokenCache};
pub use classifier::{classify, loading_snapshot, tier_for};
pub use context::SessionContext;
pub use controller::UsageTracker;
pub use lifecycle::{LifecyclePhase, SessionLifecycle};
pub use navigation::PollingNavigator;
pub use scheduler::{DiscoveryRetry, RecalcScheduler, SchedulerState};
