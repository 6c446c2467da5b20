//! Status state machine for the generation view.

use prompt_primitives::GenerationStatus;
use thiserror::Error;
use tracing::debug;

/// Events that trigger status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// A generation request was issued.
    Submit,
    /// The latest request produced a result.
    Resolve,
    /// The latest request failed.
    Reject,
    /// The view was cleared.
    Reset,
}

/// Status state manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusMachine {
    state: GenerationStatus,
}

impl StatusMachine {
    /// Constructs a machine in [`GenerationStatus::Idle`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GenerationStatus::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> GenerationStatus {
        self.state
    }

    /// Applies an event, returning the resulting state.
    ///
    /// `Submit` is accepted while loading: the newer request supersedes the
    /// one in flight.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidTransition`] when the event is not
    /// allowed from the current state.
    pub fn transition(&mut self, event: StatusEvent) -> TransitionResult<GenerationStatus> {
        use GenerationStatus::{Error, Idle, Loading, Success};

        let next = match (self.state, event) {
            (_, StatusEvent::Submit) => Some(Loading),
            (Loading, StatusEvent::Resolve) => Some(Success),
            (Loading, StatusEvent::Reject) => Some(Error),
            (_, StatusEvent::Reset) => Some(Idle),
            (Idle | Success | Error, StatusEvent::Resolve | StatusEvent::Reject) => None,
        };

        let Some(next_state) = next else {
            return Err(TransitionError::InvalidTransition {
                from: self.state,
                event,
            });
        };

        if next_state != self.state {
            debug!(from = %self.state, to = %next_state, ?event, "generation status transition");
            self.state = next_state;
        }

        Ok(self.state)
    }
}

/// Errors emitted by the status machine.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// Transition was not permitted from the current state.
    #[error("invalid status transition from {from} via {event:?}")]
    InvalidTransition {
        /// State prior to the attempted transition.
        from: GenerationStatus,
        /// Event that triggered the failure.
        event: StatusEvent,
    },
}

/// Result alias used for status transitions.
pub type TransitionResult<T> = Result<T, TransitionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_then_resolve() {
        let mut machine = StatusMachine::new();

        assert_eq!(machine.state(), GenerationStatus::Idle);
        machine.transition(StatusEvent::Submit).unwrap();
        assert!(machine.state().is_loading());
        machine.transition(StatusEvent::Resolve).unwrap();
        assert_eq!(machine.state(), GenerationStatus::Success);
    }

    #[test]
    fn retry_from_error_and_success() {
        let mut machine = StatusMachine::new();

        machine.transition(StatusEvent::Submit).unwrap();
        machine.transition(StatusEvent::Reject).unwrap();
        assert_eq!(machine.state(), GenerationStatus::Error);
        machine.transition(StatusEvent::Submit).unwrap();
        machine.transition(StatusEvent::Resolve).unwrap();
        machine.transition(StatusEvent::Submit).unwrap();
        assert_eq!(machine.state(), GenerationStatus::Loading);
    }

    #[test]
    fn resubmit_while_loading_stays_loading() {
        let mut machine = StatusMachine::new();
        machine.transition(StatusEvent::Submit).unwrap();
        assert_eq!(
            machine.transition(StatusEvent::Submit).unwrap(),
            GenerationStatus::Loading
        );
    }

    #[test]
    fn reset_is_global() {
        for event in [StatusEvent::Resolve, StatusEvent::Reject] {
            let mut machine = StatusMachine::new();
            machine.transition(StatusEvent::Submit).unwrap();
            machine.transition(event).unwrap();
            machine.transition(StatusEvent::Reset).unwrap();
            assert_eq!(machine.state(), GenerationStatus::Idle);
        }

        let mut machine = StatusMachine::new();
        machine.transition(StatusEvent::Submit).unwrap();
        machine.transition(StatusEvent::Reset).unwrap();
        assert_eq!(machine.state(), GenerationStatus::Idle);
    }

    #[test]
    fn resolve_outside_loading_errors() {
        let mut machine = StatusMachine::new();

        let err = machine
            .transition(StatusEvent::Resolve)
            .expect_err("resolve should fail from idle");

        assert!(matches!(
            err,
            TransitionError::InvalidTransition {
                from: GenerationStatus::Idle,
                event: StatusEvent::Resolve
            }
        ));
    }
}
