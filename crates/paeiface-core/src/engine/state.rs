use super::error::EngineError;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Lifecycle of one interaction inside a batch run.
///
/// ```text
/// Pending ─┬─> InputsMissing ─────────────────────────> Terminal(Failure)
///          └─> Building ─> Analyzed ─> Persisted ─────> Terminal(Success)
///                 └───────────┴──────────────────────> Terminal(Failure)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Pending,
    InputsMissing,
    Building,
    Analyzed,
    Persisted,
    Terminal(Outcome),
}

impl InteractionState {
    pub fn can_transition_to(&self, next: InteractionState) -> bool {
        use InteractionState::*;
        matches!(
            (self, next),
            (Pending, InputsMissing)
                | (Pending, Building)
                | (InputsMissing, Terminal(Outcome::Failure))
                | (Building, Analyzed)
                | (Building, Terminal(Outcome::Failure))
                | (Analyzed, Persisted)
                | (Analyzed, Terminal(Outcome::Failure))
                | (Persisted, Terminal(Outcome::Success))
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, InteractionState::Terminal(_))
    }
}

/// Tracks the state of a single interaction and logs every transition.
#[derive(Debug)]
pub struct InteractionTracker {
    interaction_id: u64,
    state: InteractionState,
}

impl InteractionTracker {
    pub fn new(interaction_id: u64) -> Self {
        Self {
            interaction_id,
            state: InteractionState::Pending,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn advance(&mut self, next: InteractionState) -> Result<(), EngineError> {
        if !self.state.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        trace!(
            interaction_id = self.interaction_id,
            from = ?self.state,
            to = ?next,
            "Interaction state transition."
        );
        self.state = next;
        Ok(())
    }

    /// Moves to `Terminal(Failure)` from any non-terminal state that allows it.
    pub fn fail(&mut self) {
        let failed = InteractionState::Terminal(Outcome::Failure);
        if self.state == InteractionState::Pending {
            self.state = InteractionState::InputsMissing;
        }
        if self.state.can_transition_to(failed) {
            self.state = failed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_reaches_success() {
        let mut tracker = InteractionTracker::new(1);
        tracker.advance(InteractionState::Building).unwrap();
        tracker.advance(InteractionState::Analyzed).unwrap();
        tracker.advance(InteractionState::Persisted).unwrap();
        tracker
            .advance(InteractionState::Terminal(Outcome::Success))
            .unwrap();
        assert!(tracker.state().is_terminal());
    }

    #[test]
    fn missing_inputs_can_only_fail() {
        let state = InteractionState::InputsMissing;
        assert!(state.can_transition_to(InteractionState::Terminal(Outcome::Failure)));
        assert!(!state.can_transition_to(InteractionState::Building));
        assert!(!state.can_transition_to(InteractionState::Terminal(Outcome::Success)));
    }

    #[test]
    fn skipping_persistence_is_rejected() {
        let mut tracker = InteractionTracker::new(2);
        tracker.advance(InteractionState::Building).unwrap();
        tracker.advance(InteractionState::Analyzed).unwrap();
        let err = tracker
            .advance(InteractionState::Terminal(Outcome::Success))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
        assert_eq!(tracker.state(), InteractionState::Analyzed);
    }

    #[test]
    fn fail_reaches_terminal_failure_from_any_open_state() {
        for steps in [
            vec![],
            vec![InteractionState::Building],
            vec![InteractionState::Building, InteractionState::Analyzed],
        ] {
            let mut tracker = InteractionTracker::new(3);
            for step in steps {
                tracker.advance(step).unwrap();
            }
            tracker.fail();
            assert_eq!(
                tracker.state(),
                InteractionState::Terminal(Outcome::Failure)
            );
        }
    }

    #[test]
    fn terminal_states_have_no_successors() {
        let done = InteractionState::Terminal(Outcome::Success);
        assert!(!done.can_transition_to(InteractionState::Pending));
        assert!(!done.can_transition_to(InteractionState::Terminal(Outcome::Failure)));
    }
}
