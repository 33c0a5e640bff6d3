//! Listening state machine with thread-safe transitions.
//!
//! Enforces valid transitions for the voice navigation lifecycle:
//! - Idle -> Listening (recognizer reported start)
//! - Listening -> Idle (explicit stop, or end of the utterance stream)

use std::fmt;
use std::sync::{Arc, Mutex};

use tactile_core::error::TactileError;

/// Operational state of the voice navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListeningState {
    /// Not listening. Ready to start.
    Idle,
    /// Actively receiving transcripts from the speech recognizer.
    Listening,
}

impl fmt::Display for ListeningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListeningState::Idle => write!(f, "Idle"),
            ListeningState::Listening => write!(f, "Listening"),
        }
    }
}

impl ListeningState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &ListeningState) -> bool {
        matches!(
            (self, target),
            (ListeningState::Idle, ListeningState::Listening)
                | (ListeningState::Listening, ListeningState::Idle)
        )
    }
}

/// Thread-safe state machine for listening state transitions.
///
/// Wraps `ListeningState` in an `Arc<Mutex<>>` so clones share one state.
/// Transitions are validated before being applied.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<ListeningState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ListeningState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> ListeningState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    ///
    /// Returns `Ok(())` if the transition is valid, or a
    /// `TactileError::Voice` if it is not allowed from the current state.
    pub fn transition(&self, target: ListeningState) -> Result<(), TactileError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Listening state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(TactileError::Voice(format!(
                "Invalid state transition: {} -> {}",
                *state, target
            )))
        }
    }

    /// Force the state machine back to Idle (used for error recovery).
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        tracing::warn!("Listening state machine reset to Idle from {}", *state);
        *state = ListeningState::Idle;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(ListeningState::Idle.to_string(), "Idle");
        assert_eq!(ListeningState::Listening.to_string(), "Listening");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(ListeningState::Idle.can_transition_to(&ListeningState::Listening));
        assert!(ListeningState::Listening.can_transition_to(&ListeningState::Idle));
    }

    #[test]
    fn test_self_transitions_invalid() {
        assert!(!ListeningState::Idle.can_transition_to(&ListeningState::Idle));
        assert!(!ListeningState::Listening.can_transition_to(&ListeningState::Listening));
    }

    #[test]
    fn test_state_machine_round_trip() {
        let sm = StateMachine::new();
        assert_eq!(sm.current(), ListeningState::Idle);

        sm.transition(ListeningState::Listening).unwrap();
        assert_eq!(sm.current(), ListeningState::Listening);

        sm.transition(ListeningState::Idle).unwrap();
        assert_eq!(sm.current(), ListeningState::Idle);
    }

    #[test]
    fn test_state_machine_invalid_transition() {
        let sm = StateMachine::new();
        let result = sm.transition(ListeningState::Idle);
        assert!(result.is_err());
        assert_eq!(sm.current(), ListeningState::Idle);
    }

    #[test]
    fn test_state_machine_reset() {
        let sm = StateMachine::new();
        sm.transition(ListeningState::Listening).unwrap();
        sm.reset();
        assert_eq!(sm.current(), ListeningState::Idle);
    }

    #[test]
    fn test_state_machine_clone_is_shared() {
        let sm1 = StateMachine::new();
        let sm2 = sm1.clone();

        sm1.transition(ListeningState::Listening).unwrap();
        assert_eq!(sm2.current(), ListeningState::Listening);
    }

    #[test]
    fn test_transition_error_message() {
        let sm = StateMachine::new();
        match sm.transition(ListeningState::Idle) {
            Err(TactileError::Voice(msg)) => {
                assert!(msg.contains("Idle"));
            }
            _ => panic!("Expected Voice error variant"),
        }
    }
}
