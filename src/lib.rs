//! cfsched - conflict-free scheduling of weighted activities
//!
//! Given a batch of time-bounded, weighted activities (for example course
//! sessions), the schedulers in this crate select a subset in which no two
//! activities overlap, maximizing either the number of activities or their
//! total weight. Intervals are half-open: an activity ending at `t` does not
//! conflict with one starting at `t`.
//!
//! Four strategies are provided behind the [`Scheduler`] trait:
//! - [`GraphColoringScheduler`](algorithms::GraphColoringScheduler) - greedy, count-optimal
//! - [`DynamicProgrammingScheduler`](algorithms::DynamicProgrammingScheduler) - weight-optimal, O(n log n)
//! - [`BacktrackingScheduler`](algorithms::BacktrackingScheduler) - exact search with pruning and constraints
//! - [`GeneticAlgorithmScheduler`](algorithms::GeneticAlgorithmScheduler) - population-based heuristic
//!
//! and a [`Comparator`] runs several of them over the same batch.
//!
//! ```
//! use cfsched::{Activity, Algorithm, Scheduler};
//!
//! let activities = vec![
//!     Activity::from_minutes(1, 0.0, 90.0).with_weight(3.0),
//!     Activity::from_minutes(2, 90.0, 180.0).with_weight(3.0),
//!     Activity::from_minutes(3, 0.0, 180.0).with_weight(5.0),
//! ];
//! let schedule = Algorithm::DynamicProgramming
//!     .scheduler()
//!     .schedule(&activities)
//!     .unwrap();
//! assert_eq!(schedule.ids(), vec![1, 2]);
//! assert_eq!(schedule.total_weight(), 6.0);
//! ```

pub mod activity;
pub mod algorithms;
pub mod comparator;
pub mod conflict;
pub mod interval;
pub mod schedule;
pub mod validation;

pub use activity::{Activity, Minutes};
pub use algorithms::{Algorithm, Objective, Scheduler, SchedulingError};
pub use comparator::{Comparator, Comparison, ComparisonRow};
pub use conflict::{conflicts, ConflictGraph};
pub use interval::Interval;
pub use schedule::{Optimality, Schedule};

/// Identifier of an activity, unique within a batch.
pub type Id = u64;
