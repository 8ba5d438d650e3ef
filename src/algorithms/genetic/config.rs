//! Configuration for the genetic-algorithm scheduler.

use std::time::Duration;

use thiserror::Error;

/// Rejected [`GaConfig`] values, reported before any generation runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("population size must be at least 1")]
    InvalidPopulationSize,

    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("elite size exceeds population size")]
    EliteExceedsPopulation,

    #[error("tournament size must be at least 1")]
    InvalidTournamentSize,
}

/// Genetic-algorithm parameters.
///
/// Use struct-update syntax to override a few fields:
///
/// ```
/// use cfsched::algorithms::GaConfig;
///
/// let config = GaConfig {
///     generations: 20,
///     random_seed: Some(7),
///     ..GaConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Number of generations to evolve.
    pub generations: usize,
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// Per-gene bit-flip probability.
    pub mutation_rate: f64,
    /// Best individuals copied unchanged into the next generation.
    pub elite_size: usize,
    /// Contestants drawn per tournament selection.
    pub tournament_size: usize,
    /// Seed for reproducible runs. `None` draws from OS entropy.
    pub random_seed: Option<u64>,
    /// Stop evolving once this much wall-clock time has passed.
    pub time_limit: Option<Duration>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elite_size: 5,
            tournament_size: 3,
            random_seed: None,
            time_limit: None,
        }
    }
}

impl GaConfig {
    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// The first violated rule, in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize);
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if self.elite_size > self.population_size {
            return Err(ConfigError::EliteExceedsPopulation);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}
