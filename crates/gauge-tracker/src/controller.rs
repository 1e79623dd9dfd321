//! UsageTracker — owns at most one live session and drives resets.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gauge_core::models::{ChangeSource, UsageSnapshot};
use gauge_core::traits::{PageAdapter, SnapshotSink};
use gauge_core::GaugeConfig;
use gauge_observability::tracing_setup::events;
use gauge_observability::{MetricsSnapshot, PipelineMetrics};
use gauge_tokens::RequestBridge;
use tokio::sync::watch;
use tracing::debug;

use crate::classifier::loading_snapshot;
use crate::context::SessionContext;
use crate::gate::SnapshotGate;
use crate::session::{SessionHandle, TrackerShared};

/// Top-level usage tracker.
///
/// Observes conversation identities and keeps exactly one session alive for
/// the current one. A change of identity tears the old session down, clears
/// its cache and emits a loading snapshot before this call returns.
pub struct UsageTracker {
    shared: Arc<TrackerShared>,
    live: Mutex<Option<SessionHandle>>,
}

impl UsageTracker {
    /// Build a tracker. Counting metrics are shared with `bridge`.
    pub fn new(
        adapter: Arc<dyn PageAdapter>,
        bridge: RequestBridge,
        sink: Arc<dyn SnapshotSink>,
        config: GaugeConfig,
    ) -> Self {
        let metrics = Arc::clone(bridge.metrics());
        Self {
            shared: Arc::new(TrackerShared {
                adapter,
                bridge,
                gate: SnapshotGate::new(sink),
                config,
                metrics,
            }),
            live: Mutex::new(None),
        }
    }

    /// Start tracking `identity`, resetting if it differs from the live
    /// session. Returns true if a new session was started.
    ///
    /// Must be called within a tokio runtime.
    pub fn observe_identity(&self, identity: &str) -> bool {
        let mut live = self.lock_live();
        if live.as_ref().is_some_and(|session| session.context.tracks(identity)) {
            return false;
        }

        if let Some(previous) = live.take() {
            let evicted = previous.teardown();
            events::session_reset(&previous.context.identity, identity, evicted);
        }

        let max_tokens = self
            .shared
            .config
            .usage
            .resolve_limit(self.shared.adapter.current_model_limit());
        let generation = self.shared.gate.open(loading_snapshot(max_tokens));

        let context = SessionContext::new(identity);
        events::session_started(&context.session_id, &context.identity);
        self.shared.metrics.record_session();
        *live = Some(SessionHandle::spawn(context, Arc::clone(&self.shared), generation));
        true
    }

    /// Forward an external change notification (e.g. a keystroke) to the
    /// live session. Returns false if there is none.
    pub fn notify(&self, source: ChangeSource) -> bool {
        self.lock_live()
            .as_ref()
            .is_some_and(|session| session.notify(source))
    }

    /// Follow identity changes until the sender side of `navigation` closes.
    pub async fn run(&self, mut navigation: watch::Receiver<String>) {
        let identity = navigation.borrow_and_update().clone();
        self.observe_identity(&identity);

        while navigation.changed().await.is_ok() {
            let identity = navigation.borrow_and_update().clone();
            self.observe_identity(&identity);
        }
        debug!("navigation source closed");
    }

    /// Tear down the live session without starting another.
    pub fn shutdown(&self) {
        if let Some(session) = self.lock_live().take() {
            session.teardown();
            self.shared.gate.close();
            debug!(session_id = %session.context.session_id, "tracker shut down");
        }
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<SessionContext> {
        self.lock_live().as_ref().map(|session| session.context.clone())
    }

    /// Entries in the live session's token cache.
    pub fn cache_len(&self) -> usize {
        self.lock_live()
            .as_ref()
            .map(|session| session.cache_len())
            .unwrap_or(0)
    }

    /// Most recently emitted snapshot.
    pub fn latest_snapshot(&self) -> Option<UsageSnapshot> {
        self.shared.gate.latest()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    pub fn pipeline_metrics(&self) -> &Arc<PipelineMetrics> {
        &self.shared.metrics
    }

    fn lock_live(&self) -> MutexGuard<'_, Option<SessionHandle>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for UsageTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
