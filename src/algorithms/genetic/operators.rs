//! Selection, crossover and mutation on bit-vector genomes.

use rand::seq::index::sample;
use rand::Rng;

use super::genome::Genome;

/// Tournament selection.
///
/// Draws `size` distinct contestants (fewer if the population is smaller) and
/// returns the index of the fittest; ties go to the contestant drawn first.
pub(crate) fn tournament<R: Rng>(population: &[Genome], size: usize, rng: &mut R) -> usize {
    let amount = size.min(population.len()).max(1);
    let mut contestants = sample(rng, population.len(), amount).into_iter();
    let mut winner = contestants.next().unwrap_or(0);
    for candidate in contestants {
        if population[candidate].fitness() > population[winner].fitness() {
            winner = candidate;
        }
    }
    winner
}

/// Single-point crossover.
///
/// The cut point is drawn from `1..len`, so both children mix genes from both
/// parents. Genomes shorter than two genes are copied unchanged.
pub(crate) fn crossover<R: Rng>(a: &[bool], b: &[bool], rng: &mut R) -> (Vec<bool>, Vec<bool>) {
    let n = a.len();
    if n < 2 {
        return (a.to_vec(), b.to_vec());
    }
    let point = rng.gen_range(1..n);
    let mut left = a[..point].to_vec();
    left.extend_from_slice(&b[point..]);
    let mut right = b[..point].to_vec();
    right.extend_from_slice(&a[point..]);
    (left, right)
}

/// Flips each gene independently with probability `rate`.
pub(crate) fn mutate<R: Rng>(genes: &mut [bool], rate: f64, rng: &mut R) {
    if rate <= 0.0 {
        return;
    }
    for gene in genes.iter_mut() {
        if rng.gen_bool(rate) {
            *gene = !*gene;
        }
    }
}
