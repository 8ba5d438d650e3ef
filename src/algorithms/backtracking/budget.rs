//! Search budget for the exhaustive scheduler.

use std::time::{Duration, Instant};

/// Limits on how long the exhaustive search may run.
///
/// When a limit is hit the search stops and the best schedule found so far is
/// returned, flagged [`Optimality::BestEffort`](crate::schedule::Optimality::BestEffort).
/// Running out of budget is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchBudget {
    /// Maximum number of search nodes to expand.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_steps: Option<u64>,
    /// Maximum wall-clock time for the search.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    /// No limit: the search always runs to completion.
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            time_limit: None,
        }
    }

    pub fn time(limit: Duration) -> Self {
        Self {
            max_steps: None,
            time_limit: Some(limit),
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_steps.is_none() && self.time_limit.is_none()
    }

    pub(crate) fn start(&self) -> BudgetClock {
        BudgetClock {
            max_steps: self.max_steps,
            deadline: self.time_limit.map(|limit| Instant::now() + limit),
            steps: 0,
        }
    }
}

/// Running counter for one search.
#[derive(Debug)]
pub(crate) struct BudgetClock {
    max_steps: Option<u64>,
    deadline: Option<Instant>,
    steps: u64,
}

impl BudgetClock {
    /// How often (in steps) the wall clock is consulted.
    const CLOCK_STRIDE: u64 = 64;

    /// Counts one step and reports whether the budget is now exceeded.
    pub(crate) fn tick(&mut self) -> bool {
        self.steps += 1;
        if let Some(max) = self.max_steps {
            if self.steps > max {
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if self.steps % Self::CLOCK_STRIDE == 1 && Instant::now() >= deadline {
                return true;
            }
        }
        false
    }

    pub(crate) fn steps(&self) -> u64 {
        self.steps
    }
}
