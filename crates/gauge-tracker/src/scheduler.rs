//! Recalculation scheduling: debounce, mutual exclusion, one trailing pass.
//!
//! Pure state machines. The session actor owns the clock and the timers;
//! these types only decide what should happen next. A session reset drops
//! the actor and its scheduler with it.

use std::time::Duration;

use gauge_core::config::SchedulerConfig;
use gauge_core::models::ChangeSource;
use tokio::time::Instant;

/// Where the scheduler currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    /// A debounce window is open and closes at `deadline`.
    Pending { deadline: Instant },
    /// A pass is running. `follow_up` is owed if anything changed meanwhile.
    Running { follow_up: bool },
}

/// Coalesces change notifications into recomputation passes.
#[derive(Debug, Clone)]
pub struct RecalcScheduler {
    mutation_debounce: Duration,
    input_debounce: Duration,
    state: SchedulerState,
}

impl RecalcScheduler {
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            mutation_debounce: config.debounce_for(ChangeSource::Mutation),
            input_debounce: config.debounce_for(ChangeSource::Input),
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    /// Record a change. Restarts the debounce window, or marks a follow-up
    /// as owed when a pass is already running.
    pub fn notify(&mut self, source: ChangeSource, now: Instant) {
        self.state = match self.state {
            SchedulerState::Idle | SchedulerState::Pending { .. } => SchedulerState::Pending {
                deadline: now + self.debounce_for(source),
            },
            SchedulerState::Running { .. } => SchedulerState::Running { follow_up: true },
        };
    }

    /// When the open debounce window closes, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// The debounce window closed. Returns true if a pass should start now.
    pub fn fire(&mut self) -> bool {
        match self.state {
            SchedulerState::Pending { .. } => {
                self.state = SchedulerState::Running { follow_up: false };
                true
            }
            _ => false,
        }
    }

    /// The running pass finished. Returns true if the owed follow-up pass
    /// should start immediately.
    pub fn complete(&mut self) -> bool {
        match self.state {
            SchedulerState::Running { follow_up: true } => {
                self.state = SchedulerState::Running { follow_up: false };
                true
            }
            SchedulerState::Running { follow_up: false } => {
                self.state = SchedulerState::Idle;
                false
            }
            _ => false,
        }
    }

    fn debounce_for(&self, source: ChangeSource) -> Duration {
        match source {
            ChangeSource::Mutation => self.mutation_debounce,
            ChangeSource::Input => self.input_debounce,
        }
    }
}

/// Bounded retries for locating the observed region.
#[derive(Debug, Clone)]
pub struct DiscoveryRetry {
    interval: Duration,
    max_attempts: u32,
    attempts: u32,
}

impl DiscoveryRetry {
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            interval: config.discovery_interval(),
            max_attempts: config.discovery_max_attempts,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Record a failed attempt. Returns the delay before the next one, or
    /// `None` once every attempt is spent.
    pub fn record_failure(&mut self) -> Option<Duration> {
        self.attempts = self.attempts.saturating_add(1);
        (self.attempts < self.max_attempts).then_some(self.interval)
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> RecalcScheduler {
        RecalcScheduler::new(&SchedulerConfig::default())
    }

    #[test]
    fn burst_collapses_into_one_window() {
        let mut s = scheduler();
        let start = Instant::now();
        s.notify(ChangeSource::Mutation, start);
        s.notify(ChangeSource::Mutation, start + Duration::from_millis(100));
        s.notify(ChangeSource::Mutation, start + Duration::from_millis(200));
        assert_eq!(
            s.deadline(),
            Some(start + Duration::from_millis(500)),
            "last notification restarts the window"
        );
        assert!(s.fire());
        assert!(!s.fire(), "a running pass cannot be fired again");
    }

    #[test]
    fn input_uses_shorter_window() {
        let mut s = scheduler();
        let now = Instant::now();
        s.notify(ChangeSource::Input, now);
        assert_eq!(s.deadline(), Some(now + Duration::from_millis(150)));
    }

    #[test]
    fn notifications_while_running_owe_exactly_one_follow_up() {
        let mut s = scheduler();
        let now = Instant::now();
        s.notify(ChangeSource::Mutation, now);
        assert!(s.fire());

        s.notify(ChangeSource::Mutation, now);
        s.notify(ChangeSource::Input, now);
        assert_eq!(s.deadline(), None);

        assert!(s.complete(), "follow-up owed");
        assert!(s.is_running());
        assert!(!s.complete(), "only one follow-up");
        assert_eq!(s.state(), SchedulerState::Idle);
    }

    #[test]
    fn fire_without_window_is_noop() {
        let mut s = scheduler();
        assert!(!s.fire());
        assert!(!s.complete());
        assert_eq!(s.state(), SchedulerState::Idle);
    }

    #[test]
    fn discovery_gives_up_after_max_attempts() {
        let mut d = DiscoveryRetry::new(&SchedulerConfig {
            discovery_max_attempts: 3,
            ..SchedulerConfig::default()
        });
        assert_eq!(d.record_failure(), Some(Duration::from_millis(1000)));
        assert_eq!(d.record_failure(), Some(Duration::from_millis(1000)));
        assert_eq!(d.record_failure(), None);
        assert_eq!(d.attempts(), 3);
        d.reset();
        assert_eq!(d.attempts(), 0);
    }
}
