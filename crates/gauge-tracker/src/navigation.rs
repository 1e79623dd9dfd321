//! Identity polling for hosts without native navigation events.

use std::sync::Arc;
use std::time::Duration;

use gauge_core::config::SchedulerConfig;
use gauge_core::traits::PageAdapter;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Publishes the adapter's conversation identity on a watch channel,
/// polling every `navigation_poll_ms`. Only changes are published.
pub struct PollingNavigator;

/// Floor for the poll period; `tokio::time::interval` panics on zero.
const MIN_POLL: Duration = Duration::from_millis(1);

impl PollingNavigator {
    /// Start polling. The task stops once every receiver is dropped.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(
        adapter: Arc<dyn PageAdapter>,
        config: &SchedulerConfig,
    ) -> (watch::Receiver<String>, JoinHandle<()>) {
        let poll = config.navigation_poll().max(MIN_POLL);
        let (tx, rx) = watch::channel(adapter.conversation_identity());

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = tx.closed() => break,
                }

                let identity = adapter.conversation_identity();
                tx.send_if_modified(|current| {
                    if *current == identity {
                        return false;
                    }
                    debug!(from = %current, to = %identity, "conversation identity changed");
                    *current = identity;
                    true
                });
            }
        });

        (rx, task)
    }
}
