//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions on lifecycle statuses such as the dashboard status.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DashboardStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Idle, Analyzing) | (Analyzing, Displayed))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Idle => vec![Analyzing],
///             // ... etc
///         }
///     }
/// }
///
/// let next = status.transition_to(DashboardStatus::Analyzing)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum RequestStatus {
        Queued,
        Sent,
        Answered,
        Dropped,
    }

    impl StateMachine for RequestStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use RequestStatus::*;
            matches!(
                (self, target),
                (Queued, Sent) | (Sent, Answered) | (Sent, Dropped) | (Queued, Dropped)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use RequestStatus::*;
            match self {
                Queued => vec![Sent, Dropped],
                Sent => vec![Answered, Dropped],
                Answered | Dropped => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(
            RequestStatus::Queued.transition_to(RequestStatus::Sent),
            Ok(RequestStatus::Sent)
        );
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = RequestStatus::Queued
            .transition_to(RequestStatus::Answered)
            .unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Queued to Answered"));
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(RequestStatus::Answered.is_terminal());
        assert!(RequestStatus::Dropped.is_terminal());
        assert!(!RequestStatus::Sent.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        use RequestStatus::*;
        for status in [Queued, Sent, Answered, Dropped] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target), "{:?} -> {:?}", status, target);
            }
        }
    }
}
