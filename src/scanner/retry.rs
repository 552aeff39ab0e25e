//! Per-port retry policy, expressed as a small state machine.
//!
//! A port starts in [`AttemptState::Attempting`] and is advanced by each probe
//! outcome until it reaches `Recorded` or `Abandoned`. Refused and timed-out
//! attempts consume the retry budget; any other error abandons the port at once.

use crate::scanner::traits::ProbeOutcome;
use serde::{Deserialize, Serialize};

/// Default number of probe attempts per port.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How many times a port is probed before it is given up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// Create a policy; the budget is at least one attempt.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Initial state for a freshly dequeued port.
    pub fn start(&self) -> AttemptState {
        AttemptState::Attempting {
            remaining: self.max_attempts,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Why a port was given up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonReason {
    /// Every attempt was refused or timed out.
    RetriesExhausted,
    /// A non-transient error; no retry was made.
    NonTransient,
}

/// Probe state of a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// First attempt pending; `remaining` counts it.
    Attempting { remaining: u32 },
    /// A transient failure was seen and attempts remain.
    Retrying { remaining: u32 },
    /// The port answered and must be recorded.
    Recorded,
    Abandoned(AbandonReason),
}

/// Final state of a port once probing has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Recorded,
    Abandoned(AbandonReason),
}

impl AttemptState {
    /// The final state, or `None` while another probe is due.
    pub const fn settled(self) -> Option<Settled> {
        match self {
            Self::Attempting { .. } | Self::Retrying { .. } => None,
            Self::Recorded => Some(Settled::Recorded),
            Self::Abandoned(reason) => Some(Settled::Abandoned(reason)),
        }
    }

    /// Apply one probe outcome. Settled states absorb further outcomes.
    pub fn advance(self, outcome: ProbeOutcome) -> Self {
        let remaining = match self {
            Self::Attempting { remaining } | Self::Retrying { remaining } => remaining,
            settled => return settled,
        };

        if outcome == ProbeOutcome::Open {
            return Self::Recorded;
        }
        if !outcome.is_transient() {
            return Self::Abandoned(AbandonReason::NonTransient);
        }
        match remaining.saturating_sub(1) {
            0 => Self::Abandoned(AbandonReason::RetriesExhausted),
            left => Self::Retrying { remaining: left },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(policy: RetryPolicy, outcomes: &[ProbeOutcome]) -> (AttemptState, usize) {
        let mut state = policy.start();
        let mut probes = 0;
        for &outcome in outcomes {
            if state.settled().is_some() {
                break;
            }
            probes += 1;
            state = state.advance(outcome);
        }
        (state, probes)
    }

    #[test]
    fn test_open_on_first_attempt() {
        let (state, probes) = run(RetryPolicy::default(), &[ProbeOutcome::Open]);
        assert_eq!(state, AttemptState::Recorded);
        assert_eq!(probes, 1);
    }

    #[test]
    fn test_open_after_transient_failures() {
        let (state, probes) = run(
            RetryPolicy::default(),
            &[ProbeOutcome::TimedOut, ProbeOutcome::Refused, ProbeOutcome::Open],
        );
        assert_eq!(state, AttemptState::Recorded);
        assert_eq!(probes, 3);
    }

    #[test]
    fn test_transient_failures_exhaust_budget() {
        let outcomes = [ProbeOutcome::Refused; 10];
        let (state, probes) = run(RetryPolicy::new(3), &outcomes);
        assert_eq!(state, AttemptState::Abandoned(AbandonReason::RetriesExhausted));
        assert_eq!(probes, 3);
    }

    #[test]
    fn test_other_error_abandons_without_retry() {
        let (state, probes) = run(
            RetryPolicy::default(),
            &[ProbeOutcome::OtherError, ProbeOutcome::Open],
        );
        assert_eq!(state, AttemptState::Abandoned(AbandonReason::NonTransient));
        assert_eq!(probes, 1);
    }

    #[test]
    fn test_retrying_state_tracks_budget() {
        let state = RetryPolicy::new(3).start().advance(ProbeOutcome::TimedOut);
        assert_eq!(state, AttemptState::Retrying { remaining: 2 });
    }

    #[test]
    fn test_zero_budget_is_raised_to_one() {
        assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
    }

    #[test]
    fn test_terminal_states_absorb() {
        assert_eq!(
            AttemptState::Recorded.advance(ProbeOutcome::Refused),
            AttemptState::Recorded
        );
        assert_eq!(
            AttemptState::Abandoned(AbandonReason::NonTransient).settled(),
            Some(Settled::Abandoned(AbandonReason::NonTransient))
        );
    }

    #[test]
    fn test_pending_states_are_not_settled() {
        assert_eq!(RetryPolicy::default().start().settled(), None);
        assert_eq!(AttemptState::Retrying { remaining: 1 }.settled(), None);
        assert_eq!(AttemptState::Recorded.settled(), Some(Settled::Recorded));
    }
}
