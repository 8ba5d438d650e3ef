//! Side-by-side runs of several schedulers over one batch.
//!
//! A [`Comparator`] holds a list of schedulers (by default one per
//! [`Algorithm`]) and runs each over the same activities, recording the
//! resulting schedule, its size and weight, and the wall-clock time taken.
//! [`Comparator::run_parallel`] spreads the calls over the rayon thread pool;
//! each scheduler still runs single-threaded on its own.

use std::fmt;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use crate::activity::Activity;
use crate::algorithms::{Algorithm, Objective, Scheduler, SchedulingError};
use crate::schedule::{Optimality, Schedule};

/// Outcome of one scheduler.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub algorithm: String,
    pub objective: Objective,
    pub count: usize,
    pub total_weight: f64,
    pub elapsed: Duration,
    pub optimality: Optimality,
    pub schedule: Schedule,
}

/// Rows in the order the schedulers were registered.
#[derive(Debug, Clone)]
pub struct Comparison {
    input_size: usize,
    rows: Vec<ComparisonRow>,
}

impl Comparison {
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Number of activities the schedulers were given.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn row(&self, algorithm: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.algorithm == algorithm)
    }

    /// Heaviest schedule; ties keep the earlier row.
    pub fn best_by_weight(&self) -> Option<&ComparisonRow> {
        self.rows.iter().fold(None, |best, row| match best {
            Some(b) if b.total_weight >= row.total_weight => Some(b),
            _ => Some(row),
        })
    }

    /// Largest schedule; ties keep the earlier row.
    pub fn best_by_count(&self) -> Option<&ComparisonRow> {
        self.rows.iter().fold(None, |best, row| match best {
            Some(b) if b.count >= row.count => Some(b),
            _ => Some(row),
        })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Scheduler Comparison ({} activities) ===",
            self.input_size
        )?;
        writeln!(
            f,
            "  {:<20} {:<9} {:>6} {:>12} {:>12}  {}",
            "algorithm", "objective", "count", "weight", "elapsed ms", "optimality"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "  {:<20} {:<9} {:>6} {:>12.2} {:>12.3}  {}",
                row.algorithm,
                row.objective.to_string(),
                row.count,
                row.total_weight,
                row.elapsed.as_secs_f64() * 1000.0,
                row.optimality
            )?;
        }
        Ok(())
    }
}

/// Runs a set of schedulers over the same batch.
pub struct Comparator {
    schedulers: Vec<Box<dyn Scheduler>>,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.schedulers.iter().map(|s| s.name()))
            .finish()
    }
}

impl Comparator {
    /// One default-configured scheduler per [`Algorithm`], in [`Algorithm::ALL`] order.
    pub fn new() -> Self {
        Self {
            schedulers: Algorithm::ALL.iter().map(Algorithm::scheduler).collect(),
        }
    }

    /// A comparator with no schedulers; add them with [`with_scheduler`](Self::with_scheduler).
    pub fn empty() -> Self {
        Self {
            schedulers: Vec::new(),
        }
    }

    pub fn with_scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.schedulers.push(Box::new(scheduler));
        self
    }

    pub fn len(&self) -> usize {
        self.schedulers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedulers.is_empty()
    }

    /// Runs every scheduler in turn.
    ///
    /// # Errors
    ///
    /// The first scheduler error, in registration order.
    pub fn run(&self, activities: &[Activity]) -> Result<Comparison, SchedulingError> {
        let rows = self
            .schedulers
            .iter()
            .map(|s| measure(s.as_ref(), activities))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.finish(activities, rows))
    }

    /// Like [`run`](Self::run), with schedulers running concurrently.
    pub fn run_parallel(&self, activities: &[Activity]) -> Result<Comparison, SchedulingError> {
        let rows = self
            .schedulers
            .par_iter()
            .map(|s| measure(s.as_ref(), activities))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.finish(activities, rows))
    }

    fn finish(&self, activities: &[Activity], rows: Vec<ComparisonRow>) -> Comparison {
        debug!(
            input = activities.len(),
            schedulers = rows.len(),
            "comparison complete"
        );
        Comparison {
            input_size: activities.len(),
            rows,
        }
    }
}

fn measure(scheduler: &dyn Scheduler, activities: &[Activity]) -> Result<ComparisonRow, SchedulingError> {
    let started = Instant::now();
    let schedule = scheduler.schedule(activities)?;
    let elapsed = started.elapsed();
    Ok(ComparisonRow {
        algorithm: scheduler.name().to_string(),
        objective: scheduler.objective(),
        count: schedule.count(),
        total_weight: schedule.total_weight(),
        elapsed,
        optimality: schedule.optimality(),
        schedule,
    })
}
