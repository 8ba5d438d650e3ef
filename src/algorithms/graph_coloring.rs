//! Greedy count-maximizing scheduler built on the conflict graph.
//!
//! Activities are visited by end time (ties by start, then id) and each one is
//! accepted if it does not conflict with the last accepted activity. This is
//! the classic activity-selection greedy: the result holds the maximum number
//! of pairwise non-conflicting activities. It ignores weights.
//!
//! The same scheduler also exposes the Welsh-Powell colouring of the conflict
//! graph through [`GraphColoringScheduler::slots`], i.e. how many parallel
//! tracks would be needed to run every activity of the batch.

use tracing::debug;

use super::{by_end, Objective, Scheduler, SchedulingError};
use crate::activity::Activity;
use crate::conflict::{Coloring, ConflictGraph};
use crate::schedule::{Optimality, Schedule};
use crate::validation::validate_activities;

/// Count-optimal greedy scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphColoringScheduler;

impl GraphColoringScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Colours the conflict graph of `activities` (Welsh-Powell).
    ///
    /// # Errors
    ///
    /// `InvalidActivity` if the batch is malformed.
    pub fn slots(&self, activities: &[Activity]) -> Result<Coloring, SchedulingError> {
        validate_activities(activities)?;
        Ok(ConflictGraph::build(activities).welsh_powell())
    }
}

impl Scheduler for GraphColoringScheduler {
    fn schedule(&self, activities: &[Activity]) -> Result<Schedule, SchedulingError> {
        validate_activities(activities)?;

        let mut sorted: Vec<&Activity> = activities.iter().collect();
        sorted.sort_by(|a, b| by_end(a, b));

        let mut selected: Vec<Activity> = Vec::new();
        let mut frontier = f64::NEG_INFINITY;
        for activity in sorted {
            if activity.start().value() >= frontier {
                frontier = activity.end().value();
                selected.push(activity.clone());
            }
        }

        let schedule = Schedule::from_activities(selected, Optimality::Optimal)?;
        debug!(
            input = activities.len(),
            selected = schedule.count(),
            total_weight = schedule.total_weight(),
            "graph-coloring schedule built"
        );
        Ok(schedule)
    }

    fn name(&self) -> &str {
        "graph-coloring"
    }

    fn objective(&self) -> Objective {
        Objective::Count
    }
}
