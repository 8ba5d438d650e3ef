//! Weighted interval scheduling by dynamic programming.
//!
//! With activities sorted by end time (ties by start, then id) and indexed
//! from 1, let `p(i)` be the number of activities that end no later than
//! activity `i` starts, i.e. the last compatible predecessor. Then
//!
//! ```text
//! OPT(0) = 0
//! OPT(i) = max(OPT(i - 1), w(i) + OPT(p(i)))
//! ```
//!
//! `p(i)` is found by binary search over the sorted end times, so the whole
//! algorithm runs in O(n log n).
//!
//! # Tie-break
//!
//! Activity `i` is taken only when `w(i) + OPT(p(i)) > OPT(i - 1)` strictly.
//! When both options weigh the same, the solution already reachable in the
//! shorter prefix wins, which favours earlier-ending and fewer activities.

use tracing::debug;

use super::{by_end, Objective, Scheduler, SchedulingError};
use crate::activity::Activity;
use crate::schedule::{Optimality, Schedule};
use crate::validation::validate_activities;

/// Weight-optimal scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicProgrammingScheduler;

impl DynamicProgrammingScheduler {
    pub fn new() -> Self {
        Self
    }
}

/// `p(i)` for every 1-based `i`; entry 0 is unused.
fn predecessors(sorted: &[&Activity]) -> Vec<usize> {
    let mut p = vec![0; sorted.len() + 1];
    for (i, activity) in sorted.iter().enumerate() {
        let start = activity.start().value();
        // Ends are non-decreasing, so the compatible prefix is contiguous.
        p[i + 1] = sorted[..i].partition_point(|a| a.end().value() <= start);
    }
    p
}

impl Scheduler for DynamicProgrammingScheduler {
    fn schedule(&self, activities: &[Activity]) -> Result<Schedule, SchedulingError> {
        validate_activities(activities)?;

        let mut sorted: Vec<&Activity> = activities.iter().collect();
        sorted.sort_by(|a, b| by_end(a, b));
        let n = sorted.len();
        let p = predecessors(&sorted);

        let mut opt = vec![0.0_f64; n + 1];
        let mut take = vec![false; n + 1];
        for i in 1..=n {
            let with = sorted[i - 1].weight() + opt[p[i]];
            let without = opt[i - 1];
            if with > without {
                opt[i] = with;
                take[i] = true;
            } else {
                opt[i] = without;
            }
        }

        let mut selected = Vec::new();
        let mut i = n;
        while i > 0 {
            if take[i] {
                selected.push(sorted[i - 1].clone());
                i = p[i];
            } else {
                i -= 1;
            }
        }

        let schedule = Schedule::from_activities(selected, Optimality::Optimal)?;
        debug!(
            input = n,
            selected = schedule.count(),
            total_weight = opt[n],
            "dynamic-programming schedule built"
        );
        Ok(schedule)
    }

    fn name(&self) -> &str {
        "dynamic-programming"
    }

    fn objective(&self) -> Objective {
        Objective::Weight
    }
}
