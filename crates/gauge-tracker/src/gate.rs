//! Serializes snapshot delivery across session generations.
//!
//! Each session emits under a generation number. Opening a new generation
//! and emitting its loading snapshot happens under the same lock, so once a
//! reset returns, nothing from the previous session can reach the sink.
//!
//! The sink runs while the generation lock is held. `latest` lives behind
//! its own lock and is updated first, so a sink may read it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gauge_core::models::UsageSnapshot;
use gauge_core::traits::SnapshotSink;

pub(crate) struct SnapshotGate {
    sink: Arc<dyn SnapshotSink>,
    generation: Mutex<u64>,
    latest: Mutex<Option<UsageSnapshot>>,
}

impl SnapshotGate {
    pub(crate) fn new(sink: Arc<dyn SnapshotSink>) -> Self {
        Self {
            sink,
            generation: Mutex::new(0),
            latest: Mutex::new(None),
        }
    }

    /// Start a new generation and deliver its first snapshot.
    pub(crate) fn open(&self, snapshot: UsageSnapshot) -> u64 {
        let mut generation = lock(&self.generation);
        *generation += 1;
        self.deliver(snapshot);
        *generation
    }

    /// Retire the current generation without emitting anything.
    pub(crate) fn close(&self) {
        *lock(&self.generation) += 1;
    }

    /// Deliver `snapshot` if `generation` is still live.
    pub(crate) fn emit(&self, generation: u64, snapshot: UsageSnapshot) -> bool {
        let live = lock(&self.generation);
        if *live != generation {
            return false;
        }
        self.deliver(snapshot);
        true
    }

    pub(crate) fn latest(&self) -> Option<UsageSnapshot> {
        lock(&self.latest).clone()
    }

    // Caller holds the generation lock.
    fn deliver(&self, snapshot: UsageSnapshot) {
        *lock(&self.latest) = Some(snapshot.clone());
        self.sink.on_snapshot(&snapshot);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
