//! Genetic-algorithm scheduler.
//!
//! A population of bit-vector genomes (gene `i` selects activity `i`) evolves
//! under elitism, tournament selection, single-point crossover and per-gene
//! bit-flip mutation. Infeasible genomes are repaired before scoring: selected
//! activities are kept by weight descending (ties by end, then id) and any
//! activity conflicting with one already kept is dropped. Fitness is the total
//! weight of the repaired selection.
//!
//! The result is always conflict-free but carries no optimality guarantee
//! ([`Optimality::Heuristic`]). With `random_seed` set, two runs over the same
//! batch and configuration return the same schedule. Without a seed the
//! generator is drawn from OS entropy and results may differ between runs.
//!
//! Module structure:
//! - [`config`] - parameters and their validation
//! - `genome` - encoding and repair
//! - `operators` - selection, crossover, mutation
//! - `engine` - the generational loop

pub mod config;
mod engine;
mod genome;
mod operators;

pub use config::{ConfigError, GaConfig};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{Objective, Scheduler, SchedulingError};
use crate::activity::Activity;
use crate::schedule::{Optimality, Schedule};
use crate::validation::validate_activities;

use genome::Problem;

/// Heuristic scheduler maximizing total weight.
#[derive(Debug, Clone, Default)]
pub struct GeneticAlgorithmScheduler {
    config: GaConfig,
}

impl GeneticAlgorithmScheduler {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA with a caller-supplied generator, ignoring `random_seed`.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the configuration is invalid
    /// - `InvalidActivity` if the batch is malformed
    pub fn schedule_with_rng<R: Rng>(
        &self,
        activities: &[Activity],
        rng: &mut R,
    ) -> Result<Schedule, SchedulingError> {
        self.config.validate()?;
        validate_activities(activities)?;
        if activities.is_empty() {
            return Ok(Schedule::empty(Optimality::Heuristic));
        }

        let problem = Problem::new(activities);
        let run = engine::evolve(&problem, &self.config, rng);
        let optimality = if run.timed_out {
            Optimality::BestEffort
        } else {
            Optimality::Heuristic
        };

        let selected = run.best.selected().map(|i| problem.activity(i).clone());
        let schedule = Schedule::from_activities(selected, optimality)?;
        debug!(
            input = activities.len(),
            selected = schedule.count(),
            total_weight = schedule.total_weight(),
            generations = run.generations,
            %optimality,
            "genetic schedule built"
        );
        Ok(schedule)
    }

    /// Runs the GA `runs` times and keeps the heaviest schedule.
    ///
    /// Run `k` is seeded with `random_seed + k` (wrapping), so a seeded
    /// configuration stays reproducible. Unseeded runs each draw from entropy.
    /// Ties keep the earlier run. `runs == 0` is treated as one run.
    pub fn schedule_best_of(
        &self,
        activities: &[Activity],
        runs: usize,
    ) -> Result<Schedule, SchedulingError> {
        let mut best: Option<Schedule> = None;
        for run in 0..runs.max(1) {
            let mut rng = match self.config.random_seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run as u64)),
                None => StdRng::from_entropy(),
            };
            let schedule = self.schedule_with_rng(activities, &mut rng)?;
            let better = best
                .as_ref()
                .map_or(true, |b| schedule.total_weight() > b.total_weight());
            if better {
                best = Some(schedule);
            }
        }
        Ok(best.unwrap_or_else(|| Schedule::empty(Optimality::Heuristic)))
    }
}

impl Scheduler for GeneticAlgorithmScheduler {
    fn schedule(&self, activities: &[Activity]) -> Result<Schedule, SchedulingError> {
        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.schedule_with_rng(activities, &mut rng)
    }

    fn name(&self) -> &str {
        "genetic"
    }

    fn objective(&self) -> Objective {
        Objective::Weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{
        acts, assert_conflict_free, brute_force, random_instance, seeded,
    };
    use std::time::Duration;

    fn seeded_scheduler(seed: u64) -> GeneticAlgorithmScheduler {
        GeneticAlgorithmScheduler::new(GaConfig {
            random_seed: Some(seed),
            ..GaConfig::default()
        })
    }

    #[test]
    fn empty_input_gives_empty_schedule() {
        let schedule = seeded_scheduler(1).schedule(&[]).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.optimality(), Optimality::Heuristic);
    }

    #[test]
    fn finds_optimum_on_small_batches() {
        let scheduler = seeded_scheduler(42);
        let two_light = scheduler
            .schedule(&acts(&[
                (1, 0.0, 90.0, 3.0),
                (2, 90.0, 180.0, 3.0),
                (3, 0.0, 180.0, 5.0),
            ]))
            .unwrap();
        assert_eq!(two_light.ids(), vec![1, 2]);

        let one_heavy = scheduler
            .schedule(&acts(&[
                (1, 0.0, 100.0, 10.0),
                (2, 0.0, 50.0, 1.0),
                (3, 50.0, 100.0, 1.0),
            ]))
            .unwrap();
        assert_eq!(one_heavy.ids(), vec![1]);

        let clique = scheduler
            .schedule(&acts(&[
                (1, 0.0, 10.0, 2.0),
                (2, 0.0, 10.0, 7.0),
                (3, 0.0, 10.0, 4.0),
            ]))
            .unwrap();
        assert_eq!(clique.ids(), vec![2]);
    }

    #[test]
    fn touching_activities_are_both_kept() {
        let schedule = seeded_scheduler(5)
            .schedule(&acts(&[(1, 0.0, 50.0, 1.0), (2, 50.0, 100.0, 1.0)]))
            .unwrap();
        assert_eq!(schedule.ids(), vec![1, 2]);
    }

    #[test]
    fn results_are_always_conflict_free() {
        let mut rng = seeded(99);
        for seed in 0..10 {
            let activities = random_instance(&mut rng, 30, 200);
            let schedule = seeded_scheduler(seed).schedule(&activities).unwrap();
            assert_conflict_free(&schedule);
        }
    }

    #[test]
    fn unseeded_results_are_conflict_free() {
        let activities = random_instance(&mut seeded(4), 20, 100);
        let schedule = GeneticAlgorithmScheduler::default()
            .schedule(&activities)
            .unwrap();
        assert_conflict_free(&schedule);
    }

    #[test]
    fn same_seed_reproduces_schedule() {
        let activities = random_instance(&mut seeded(12), 40, 300);
        let first = seeded_scheduler(7).schedule(&activities).unwrap();
        let second = seeded_scheduler(7).schedule(&activities).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn never_beats_the_exact_optimum() {
        let mut rng = seeded(31);
        for seed in 0..10 {
            let activities = random_instance(&mut rng, 10, 50);
            let schedule = seeded_scheduler(seed).schedule(&activities).unwrap();
            let (best_weight, _) = brute_force(&activities);
            assert!(schedule.total_weight() <= best_weight + 1e-9);
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let scheduler = GeneticAlgorithmScheduler::new(GaConfig {
            population_size: 0,
            elite_size: 0,
            ..GaConfig::default()
        });
        let err = scheduler.schedule(&[]).unwrap_err();
        assert_eq!(
            err,
            SchedulingError::Configuration(ConfigError::InvalidPopulationSize)
        );
    }

    #[test]
    fn invalid_activity_is_rejected() {
        let err = seeded_scheduler(1)
            .schedule(&acts(&[(1, 10.0, 5.0, 1.0)]))
            .unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidActivity { id: 1, .. }));
    }

    #[test]
    fn time_limit_yields_best_effort() {
        let scheduler = GeneticAlgorithmScheduler::new(GaConfig {
            random_seed: Some(3),
            time_limit: Some(Duration::ZERO),
            ..GaConfig::default()
        });
        let activities = random_instance(&mut seeded(6), 15, 100);
        let schedule = scheduler.schedule(&activities).unwrap();
        assert_eq!(schedule.optimality(), Optimality::BestEffort);
        assert_conflict_free(&schedule);
    }

    #[test]
    fn best_of_is_at_least_as_good_as_first_run() {
        let activities = random_instance(&mut seeded(50), 30, 200);
        let scheduler = GeneticAlgorithmScheduler::new(GaConfig {
            generations: 5,
            random_seed: Some(11),
            ..GaConfig::default()
        });
        let single = scheduler.schedule(&activities).unwrap();
        let best = scheduler.schedule_best_of(&activities, 4).unwrap();
        assert!(best.total_weight() >= single.total_weight());
        assert_eq!(best, scheduler.schedule_best_of(&activities, 4).unwrap());
    }

    #[test]
    fn injected_rng_drives_the_run() {
        let activities = random_instance(&mut seeded(8), 20, 120);
        let scheduler = GeneticAlgorithmScheduler::default();
        let a = scheduler
            .schedule_with_rng(&activities, &mut seeded(77))
            .unwrap();
        let b = scheduler
            .schedule_with_rng(&activities, &mut seeded(77))
            .unwrap();
        assert_eq!(a, b);
    }
}
