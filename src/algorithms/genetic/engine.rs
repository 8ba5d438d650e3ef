//! Generational loop.

use std::time::Instant;

use rand::Rng;
use tracing::trace;

use super::config::GaConfig;
use super::genome::{Genome, Problem};
use super::operators::{crossover, mutate, tournament};

/// Result of one evolutionary run.
#[derive(Debug, Clone)]
pub(crate) struct Evolution {
    /// Fittest genome seen in any generation.
    pub(crate) best: Genome,
    pub(crate) generations: usize,
    /// True when the time limit cut the run short.
    pub(crate) timed_out: bool,
}

/// Population indices sorted by fitness descending, ties by index.
fn ranked(population: &[Genome]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| population[b].fitness().total_cmp(&population[a].fitness()));
    order
}

/// Evolves `config.generations` generations of `config.population_size` genomes.
///
/// Each generation keeps the `elite_size` fittest genomes unchanged and fills
/// the rest with offspring of tournament-selected parents. `config` must have
/// passed [`GaConfig::validate`].
pub(crate) fn evolve<R: Rng>(problem: &Problem<'_>, config: &GaConfig, rng: &mut R) -> Evolution {
    let deadline = config.time_limit.map(|limit| Instant::now() + limit);
    let size = config.population_size;

    let mut population: Vec<Genome> = (0..size).map(|_| problem.random_genome(rng)).collect();
    let mut best = ranked(&population)
        .first()
        .map(|&i| population[i].clone())
        .unwrap_or_else(|| problem.evaluate(vec![false; problem.len()]));

    let mut generations = 0;
    let mut timed_out = false;
    for generation in 0..config.generations {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            timed_out = true;
            break;
        }

        let mut next: Vec<Genome> = ranked(&population)
            .into_iter()
            .take(config.elite_size)
            .map(|i| population[i].clone())
            .collect();

        while next.len() < size {
            let a = tournament(&population, config.tournament_size, rng);
            let b = tournament(&population, config.tournament_size, rng);
            let (mut left, mut right) = if rng.gen_bool(config.crossover_rate) {
                crossover(population[a].genes(), population[b].genes(), rng)
            } else {
                (population[a].genes().to_vec(), population[b].genes().to_vec())
            };
            mutate(&mut left, config.mutation_rate, rng);
            mutate(&mut right, config.mutation_rate, rng);

            next.push(problem.evaluate(left));
            if next.len() < size {
                next.push(problem.evaluate(right));
            }
        }
        population = next;
        generations += 1;

        let leader = ranked(&population)[0];
        if population[leader].fitness() > best.fitness() {
            best = population[leader].clone();
        }
        trace!(
            generation,
            leader_fitness = population[leader].fitness(),
            best_fitness = best.fitness(),
            "ga generation complete"
        );
    }

    Evolution {
        best,
        generations,
        timed_out,
    }
}
