use tokio::sync::{mpsc, watch};

use crate::models::UsageSnapshot;

/// Presentation-layer receiver of usage snapshots.
///
/// Delivery is serialized: `on_snapshot` runs while the tracker holds its
/// delivery lock, and during a reset also its session lock. Implementations
/// may read `UsageTracker::latest_snapshot` and `UsageTracker::metrics`, but
/// must not call back into `observe_identity`, `notify`, `shutdown`,
/// `session` or `cache_len`; forward to a channel and act from there.
pub trait SnapshotSink: Send + Sync {
    /// Called once per completed pass and once on every session reset.
    fn on_snapshot(&self, snapshot: &UsageSnapshot);
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> SnapshotSink for FnSink<F>
where
    F: Fn(&UsageSnapshot) + Send + Sync,
{
    fn on_snapshot(&self, snapshot: &UsageSnapshot) {
        (self.0)(snapshot)
    }
}

/// Latest-value sink: readers always see the newest whole snapshot.
impl SnapshotSink for watch::Sender<Option<UsageSnapshot>> {
    fn on_snapshot(&self, snapshot: &UsageSnapshot) {
        self.send_replace(Some(snapshot.clone()));
    }
}

/// Queueing sink. A closed receiver drops the snapshot.
impl SnapshotSink for mpsc::UnboundedSender<UsageSnapshot> {
    fn on_snapshot(&self, snapshot: &UsageSnapshot) {
        let _ = self.send(snapshot.clone());
    }
}
