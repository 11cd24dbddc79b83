//! Presentation hooks.
//!
//! The controller reports every committed mutation and the end of the match
//! through a `MatchObserver`. Observers only read; they never drive actions.

use crate::core::MatchState;

/// Receives match notifications.
pub trait MatchObserver {
    /// Called after every committed mutation.
    fn state_changed(&mut self, _state: &MatchState) {}

    /// Called exactly once, when the match ends.
    fn match_ended(&mut self, _message: &str) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl MatchObserver for NullObserver {}

/// Observer that records notifications, for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub changes: usize,
    pub ended: Vec<String>,
    pub last_state: Option<MatchState>,
}

impl MatchObserver for RecordingObserver {
    fn state_changed(&mut self, state: &MatchState) {
        self.changes += 1;
        self.last_state = Some(state.clone());
    }

    fn match_ended(&mut self, message: &str) {
        self.ended.push(message.to_string());
    }
}
