//! Exhaustive weight-optimal scheduler with pruning.
//!
//! The scheduler explores include/exclude decisions over activities sorted by
//! start time (ties by end, then id) and keeps the heaviest conflict-free
//! selection. It is exact but exponential in the worst case, so it is meant
//! for small batches (a few dozen activities). A [`SearchBudget`] bounds the
//! work; when it runs out the best selection found so far is returned and
//! flagged [`Optimality::BestEffort`].
//!
//! # Tie-break
//!
//! Include branches are explored before exclude branches and an incumbent is
//! replaced only by a strictly heavier selection, so among equally heavy
//! selections the first one met in that depth-first order wins.
//!
//! # Constraints
//!
//! Besides plain optimization the scheduler accepts:
//! - **forbidden** ids, dropped before the search
//! - **time windows**: only activities lying entirely inside at least one
//!   window are considered
//! - **mandatory** ids, which must all appear in the result
//!
//! Module structure:
//! - [`budget`] - step and time limits
//! - `search` - the depth-first engine

pub mod budget;
mod search;

pub use budget::SearchBudget;

use std::collections::BTreeSet;

use qtty::Minute;
use tracing::debug;

use super::{by_start, Objective, Scheduler, SchedulingError};
use crate::activity::Activity;
use crate::conflict::conflicts;
use crate::interval::Interval;
use crate::schedule::{Optimality, Schedule};
use crate::validation::validate_activities;
use crate::Id;

use search::Search;

/// Exact scheduler maximizing total weight.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingScheduler {
    budget: SearchBudget,
    mandatory: BTreeSet<Id>,
    forbidden: BTreeSet<Id>,
    windows: Vec<Interval<Minute>>,
}

/// Activities left after constraint filtering, sorted by start time.
struct Prepared<'a> {
    sorted: Vec<&'a Activity>,
    mandatory: Vec<bool>,
}

impl BacktrackingScheduler {
    /// Creates an unconstrained scheduler with no budget.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Requires every listed activity to appear in the result.
    pub fn with_mandatory(mut self, ids: impl IntoIterator<Item = Id>) -> Self {
        self.mandatory.extend(ids);
        self
    }

    /// Excludes every listed activity from consideration.
    pub fn with_forbidden(mut self, ids: impl IntoIterator<Item = Id>) -> Self {
        self.forbidden.extend(ids);
        self
    }

    /// Restricts scheduling to activities inside at least one of `windows`.
    pub fn with_time_windows(mut self, windows: impl IntoIterator<Item = Interval<Minute>>) -> Self {
        self.windows.extend(windows);
        self
    }

    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    fn fits_windows(&self, activity: &Activity) -> bool {
        self.windows.is_empty()
            || self.windows.iter().any(|w| {
                w.start().value() <= activity.start().value()
                    && activity.end().value() <= w.end().value()
            })
    }

    /// Validates the batch, applies constraints and sorts the survivors.
    fn prepare<'a>(&self, activities: &'a [Activity]) -> Result<Prepared<'a>, SchedulingError> {
        validate_activities(activities)?;

        for id in &self.mandatory {
            if self.forbidden.contains(id) {
                return Err(SchedulingError::InfeasibleConstraints(format!(
                    "activity {id} is both mandatory and forbidden"
                )));
            }
            if !activities.iter().any(|a| a.id() == *id) {
                return Err(SchedulingError::InfeasibleConstraints(format!(
                    "mandatory activity {id} is not in the batch"
                )));
            }
        }

        let mut sorted: Vec<&Activity> = activities
            .iter()
            .filter(|a| !self.forbidden.contains(&a.id()))
            // Mandatory activities stay so a window violation is reported below.
            .filter(|a| self.fits_windows(a) || self.mandatory.contains(&a.id()))
            .collect();
        sorted.sort_by(|a, b| by_start(a, b));

        let required: Vec<&Activity> = sorted
            .iter()
            .copied()
            .filter(|a| self.mandatory.contains(&a.id()))
            .collect();
        for a in &required {
            if !self.fits_windows(a) {
                return Err(SchedulingError::InfeasibleConstraints(format!(
                    "mandatory activity {} lies outside every time window",
                    a.id()
                )));
            }
        }
        for (i, a) in required.iter().enumerate() {
            if let Some(b) = required[i + 1..].iter().find(|b| conflicts(a, b)) {
                return Err(SchedulingError::InfeasibleConstraints(format!(
                    "mandatory activities {} and {} conflict",
                    a.id(),
                    b.id()
                )));
            }
        }

        let mandatory = sorted
            .iter()
            .map(|a| self.mandatory.contains(&a.id()))
            .collect();
        Ok(Prepared { sorted, mandatory })
    }

    /// Lists conflict-free selections honouring the constraints, in
    /// exclude-first depth-first order, stopping after `limit` selections.
    ///
    /// Each selection is in start time order; the empty selection is included
    /// when no activity is mandatory.
    pub fn enumerate_feasible(
        &self,
        activities: &[Activity],
        limit: usize,
    ) -> Result<Vec<Vec<Activity>>, SchedulingError> {
        let prepared = self.prepare(activities)?;
        let search = Search::new(&prepared.sorted, prepared.mandatory);
        Ok(search
            .enumerate(limit)
            .into_iter()
            .map(|selection| {
                selection
                    .into_iter()
                    .map(|i| prepared.sorted[i].clone())
                    .collect()
            })
            .collect())
    }
}

impl Scheduler for BacktrackingScheduler {
    fn schedule(&self, activities: &[Activity]) -> Result<Schedule, SchedulingError> {
        let prepared = self.prepare(activities)?;
        let incumbent: Vec<usize> = prepared
            .mandatory
            .iter()
            .enumerate()
            .filter_map(|(i, &required)| required.then_some(i))
            .collect();

        let search = Search::new(&prepared.sorted, prepared.mandatory.clone());
        let mut clock = self.budget.start();
        let outcome = search.run(incumbent, &mut clock);

        let optimality = if outcome.exhausted {
            debug!(
                steps = outcome.steps,
                best_weight = outcome.best_weight,
                "backtracking budget exhausted, returning best-effort schedule"
            );
            Optimality::BestEffort
        } else {
            Optimality::Optimal
        };

        let selected = outcome.best.iter().map(|&i| prepared.sorted[i].clone());
        let schedule = Schedule::from_activities(selected, optimality)?;
        debug!(
            input = activities.len(),
            considered = prepared.sorted.len(),
            selected = schedule.count(),
            total_weight = schedule.total_weight(),
            steps = outcome.steps,
            %optimality,
            "backtracking schedule built"
        );
        Ok(schedule)
    }

    fn name(&self) -> &str {
        "backtracking"
    }

    fn objective(&self) -> Objective {
        Objective::Weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{
        acts, approx_eq, assert_conflict_free, brute_force, random_instance, seeded,
    };
    use crate::algorithms::DynamicProgrammingScheduler;
    use std::time::Duration;

    fn run(activities: &[Activity]) -> Schedule {
        BacktrackingScheduler::new().schedule(activities).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_optimal_schedule() {
        let schedule = run(&[]);
        assert_eq!(schedule.count(), 0);
        assert_eq!(schedule.total_weight(), 0.0);
        assert_eq!(schedule.optimality(), Optimality::Optimal);
    }

    #[test]
    fn two_light_sessions_beat_one_heavier() {
        let schedule = run(&acts(&[
            (1, 0.0, 90.0, 3.0),
            (2, 90.0, 180.0, 3.0),
            (3, 0.0, 180.0, 5.0),
        ]));
        assert_eq!(schedule.ids(), vec![1, 2]);
        assert_eq!(schedule.total_weight(), 6.0);
    }

    #[test]
    fn heavy_session_beats_two_light_ones() {
        let schedule = run(&acts(&[
            (1, 0.0, 100.0, 10.0),
            (2, 0.0, 50.0, 1.0),
            (3, 50.0, 100.0, 1.0),
        ]));
        assert_eq!(schedule.ids(), vec![1]);
    }

    #[test]
    fn single_and_touching_activities() {
        assert_eq!(run(&acts(&[(1, 10.0, 20.0, 1.0)])).ids(), vec![1]);
        assert_eq!(
            run(&acts(&[(1, 0.0, 50.0, 1.0), (2, 50.0, 100.0, 1.0)])).ids(),
            vec![1, 2]
        );
    }

    #[test]
    fn mutually_conflicting_set_keeps_heaviest() {
        let schedule = run(&acts(&[
            (1, 0.0, 10.0, 2.0),
            (2, 0.0, 10.0, 7.0),
            (3, 0.0, 10.0, 4.0),
            (4, 0.0, 10.0, 1.0),
            (5, 0.0, 10.0, 3.0),
        ]));
        assert_eq!(schedule.ids(), vec![2]);
    }

    #[test]
    fn equal_weight_tie_keeps_first_found_include_branch() {
        // {1, 2} is reached before {3} because activity 1 sorts first and
        // include branches are explored first.
        let schedule = run(&acts(&[
            (1, 0.0, 10.0, 1.0),
            (2, 10.0, 20.0, 1.0),
            (3, 0.0, 20.0, 2.0),
        ]));
        assert_eq!(schedule.ids(), vec![1, 2]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let activities = random_instance(&mut seeded(5), 20, 100);
        assert_eq!(run(&activities), run(&activities));
    }

    #[test]
    fn weight_matches_brute_force() {
        let mut rng = seeded(13);
        for _ in 0..40 {
            let activities = random_instance(&mut rng, 12, 60);
            let schedule = run(&activities);
            assert_conflict_free(&schedule);
            assert_eq!(schedule.optimality(), Optimality::Optimal);
            let (best_weight, _) = brute_force(&activities);
            assert!(approx_eq(schedule.total_weight(), best_weight));
        }
    }

    #[test]
    fn agrees_with_dynamic_programming_on_larger_batches() {
        let mut rng = seeded(21);
        for _ in 0..10 {
            let activities = random_instance(&mut rng, 30, 200);
            let exact = run(&activities);
            let dp = DynamicProgrammingScheduler::new().schedule(&activities).unwrap();
            assert!(approx_eq(exact.total_weight(), dp.total_weight()));
        }
    }

    #[test]
    fn step_budget_yields_best_effort() {
        let activities = random_instance(&mut seeded(9), 40, 400);
        let schedule = BacktrackingScheduler::new()
            .with_budget(SearchBudget::steps(5))
            .schedule(&activities)
            .unwrap();
        assert_eq!(schedule.optimality(), Optimality::BestEffort);
        assert_conflict_free(&schedule);
    }

    #[test]
    fn generous_budget_stays_optimal() {
        let schedule = BacktrackingScheduler::new()
            .with_budget(SearchBudget::time(Duration::from_secs(60)))
            .schedule(&acts(&[(1, 0.0, 10.0, 1.0), (2, 5.0, 15.0, 2.0)]))
            .unwrap();
        assert_eq!(schedule.optimality(), Optimality::Optimal);
        assert_eq!(schedule.ids(), vec![2]);
    }

    #[test]
    fn terminates_on_dense_conflict_graph() {
        let activities: Vec<Activity> = (1..=60)
            .map(|id| Activity::from_minutes(id, 0.0, 100.0).with_weight(id as f64))
            .collect();
        let schedule = run(&activities);
        assert_eq!(schedule.ids(), vec![60]);
    }

    #[test]
    fn forbidden_activities_are_skipped() {
        let schedule = BacktrackingScheduler::new()
            .with_forbidden([3])
            .schedule(&acts(&[
                (1, 0.0, 100.0, 1.0),
                (2, 100.0, 200.0, 1.0),
                (3, 0.0, 200.0, 10.0),
            ]))
            .unwrap();
        assert_eq!(schedule.ids(), vec![1, 2]);
    }

    #[test]
    fn mandatory_activities_are_kept_even_if_lighter() {
        let schedule = BacktrackingScheduler::new()
            .with_mandatory([2])
            .schedule(&acts(&[
                (1, 0.0, 100.0, 10.0),
                (2, 50.0, 60.0, 1.0),
                (3, 60.0, 120.0, 2.0),
            ]))
            .unwrap();
        assert_eq!(schedule.ids(), vec![2, 3]);
        assert_eq!(schedule.total_weight(), 3.0);
    }

    #[test]
    fn conflicting_mandatory_activities_are_infeasible() {
        let err = BacktrackingScheduler::new()
            .with_mandatory([1, 2])
            .schedule(&acts(&[(1, 0.0, 100.0, 1.0), (2, 50.0, 150.0, 1.0)]))
            .unwrap_err();
        assert!(matches!(err, SchedulingError::InfeasibleConstraints(_)));
    }

    #[test]
    fn unknown_or_forbidden_mandatory_is_infeasible() {
        let batch = acts(&[(1, 0.0, 100.0, 1.0)]);
        let unknown = BacktrackingScheduler::new().with_mandatory([9]).schedule(&batch);
        assert!(matches!(unknown, Err(SchedulingError::InfeasibleConstraints(_))));

        let forbidden = BacktrackingScheduler::new()
            .with_mandatory([1])
            .with_forbidden([1])
            .schedule(&batch);
        assert!(matches!(forbidden, Err(SchedulingError::InfeasibleConstraints(_))));
    }

    #[test]
    fn time_windows_filter_activities() {
        let scheduler = BacktrackingScheduler::new().with_time_windows([
            Interval::from_f64(0.0, 100.0),
            Interval::from_f64(200.0, 300.0),
        ]);
        let batch = acts(&[
            (1, 0.0, 100.0, 1.0),
            (2, 90.0, 210.0, 50.0),
            (3, 200.0, 250.0, 2.0),
        ]);
        let schedule = scheduler.schedule(&batch).unwrap();
        assert_eq!(schedule.ids(), vec![1, 3]);

        let err = scheduler.clone().with_mandatory([2]).schedule(&batch).unwrap_err();
        assert!(matches!(err, SchedulingError::InfeasibleConstraints(_)));
    }

    #[test]
    fn enumerate_feasible_lists_subsets() {
        let batch = acts(&[(1, 0.0, 50.0, 1.0), (2, 50.0, 100.0, 1.0), (3, 25.0, 75.0, 1.0)]);
        let all = BacktrackingScheduler::new()
            .enumerate_feasible(&batch, usize::MAX)
            .unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|s| crate::conflict::is_conflict_free(s)));

        let with_three = BacktrackingScheduler::new()
            .with_mandatory([3])
            .enumerate_feasible(&batch, usize::MAX)
            .unwrap();
        assert_eq!(with_three.len(), 1);
        assert_eq!(with_three[0][0].id(), 3);
    }
}
