//! Session lifecycle: still populating, or settled.

/// Phase of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// The conversation may still be rendering; counts are withheld.
    Loading,
    /// Counts are trustworthy.
    Settled,
}

/// Resolves the "new empty conversation" vs "still loading" race.
///
/// A session starts `Loading` and settles on the first pass that finds a
/// message, or that the adapter reports as an intentionally new conversation.
/// Settling is one-way for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct SessionLifecycle {
    phase: LifecyclePhase,
}

impl SessionLifecycle {
    pub fn new() -> Self {
        Self {
            phase: LifecyclePhase::Loading,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LifecyclePhase::Loading
    }

    /// Feed the result of a completed pass. Returns true if this pass settled
    /// the session.
    pub fn observe_pass(&mut self, fragments: usize, is_new_conversation: bool) -> bool {
        if self.phase == LifecyclePhase::Loading && (fragments > 0 || is_new_conversation) {
            self.phase = LifecyclePhase::Settled;
            return true;
        }
        false
    }
}

impl Default for SessionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
