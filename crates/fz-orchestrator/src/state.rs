// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-endpoint fuzzing state machine.

use serde::{Deserialize, Serialize};

/// The state of a single endpoint's fuzz run.
///
/// `READY -> TESTING <-> WAITING -> {BUDGET_EXHAUSTED | BANNED | UNHEALTHY |
/// COMPLETED}`. Only `Completed` contributes to coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointState {
    /// Not yet started.
    Ready,
    /// A probe is in flight or about to be dispatched.
    Testing,
    /// Waiting out a budget-manager delay before the next probe.
    Waiting,
    /// The endpoint or global budget was exhausted before the parameter
    /// list was fully exercised.
    BudgetExhausted,
    /// The endpoint was banned mid-run.
    Banned,
    /// The session was judged unhealthy and new endpoint work was halted.
    Unhealthy,
    /// Every parameter's payload set was exercised.
    Completed,
}

impl EndpointState {
    /// `true` for the four states that end an endpoint's run.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::BudgetExhausted | Self::Banned | Self::Unhealthy | Self::Completed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_four_states_are_terminal() {
        let terminal = [
            EndpointState::BudgetExhausted,
            EndpointState::Banned,
            EndpointState::Unhealthy,
            EndpointState::Completed,
        ];
        for state in terminal {
            assert!(state.is_terminal());
        }
        assert!(!EndpointState::Ready.is_terminal());
        assert!(!EndpointState::Testing.is_terminal());
        assert!(!EndpointState::Waiting.is_terminal());
    }
}
