pub mod backtracking;
pub mod dynamic_programming;
pub mod error;
pub mod genetic;
pub mod graph_coloring;

pub use backtracking::{BacktrackingScheduler, SearchBudget};
pub use dynamic_programming::DynamicProgrammingScheduler;
pub use error::{InvalidActivityReason, SchedulingError};
pub use genetic::{ConfigError, GaConfig, GeneticAlgorithmScheduler};
pub use graph_coloring::GraphColoringScheduler;

use std::cmp::Ordering;
use std::fmt;

use crate::activity::Activity;
use crate::schedule::Schedule;

/// What a scheduler maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Objective {
    /// Number of scheduled activities.
    Count,
    /// Sum of scheduled activity weights.
    Weight,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Count => write!(f, "count"),
            Objective::Weight => write!(f, "weight"),
        }
    }
}

/// Algorithm selecting a conflict-free subset of activities.
///
/// Implementations never mutate the input slice; each call works on its own
/// sorted copy and returns a fresh [`Schedule`]. Every implementation rejects a
/// malformed batch with [`SchedulingError::InvalidActivity`] before any
/// scheduling work, and returns an empty schedule for an empty batch.
pub trait Scheduler: Send + Sync {
    /// Selects a conflict-free subset of `activities`.
    ///
    /// # Errors
    ///
    /// - `InvalidActivity` if any activity is malformed or ids repeat
    /// - `Configuration` if the scheduler's own options are invalid
    fn schedule(&self, activities: &[Activity]) -> Result<Schedule, SchedulingError>;

    /// Returns a human-readable name for this scheduler.
    fn name(&self) -> &str;

    /// Returns the quantity this scheduler maximizes.
    fn objective(&self) -> Objective;
}

/// The closed set of scheduling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    GraphColoring,
    DynamicProgramming,
    Backtracking,
    Genetic,
}

impl Algorithm {
    /// All strategies, in the order they are usually reported.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::GraphColoring,
        Algorithm::DynamicProgramming,
        Algorithm::Backtracking,
        Algorithm::Genetic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::GraphColoring => "graph-coloring",
            Algorithm::DynamicProgramming => "dynamic-programming",
            Algorithm::Backtracking => "backtracking",
            Algorithm::Genetic => "genetic",
        }
    }

    /// Returns a scheduler for this strategy with default options.
    pub fn scheduler(&self) -> Box<dyn Scheduler> {
        match self {
            Algorithm::GraphColoring => Box::new(GraphColoringScheduler::new()),
            Algorithm::DynamicProgramming => Box::new(DynamicProgrammingScheduler::new()),
            Algorithm::Backtracking => Box::new(BacktrackingScheduler::new()),
            Algorithm::Genetic => Box::new(GeneticAlgorithmScheduler::default()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orders activities by end, then start, then id.
pub(crate) fn by_end(a: &Activity, b: &Activity) -> Ordering {
    a.end()
        .value()
        .total_cmp(&b.end().value())
        .then_with(|| a.start().value().total_cmp(&b.start().value()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Orders activities by start, then end, then id.
pub(crate) fn by_start(a: &Activity, b: &Activity) -> Ordering {
    a.start()
        .value()
        .total_cmp(&b.start().value())
        .then_with(|| a.end().value().total_cmp(&b.end().value()))
        .then_with(|| a.id().cmp(&b.id()))
}
