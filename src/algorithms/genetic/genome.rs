//! Bit-vector encoding and feasibility repair.
//!
//! Gene `i` says whether `activities[i]` is selected. Every genome is repaired
//! before it is scored and the repaired genes replace the originals, so each
//! individual in a population maps to a conflict-free schedule and its
//! fitness is simply the total weight of the selected activities.

use std::cmp::Ordering;

use rand::Rng;

use crate::activity::Activity;
use crate::conflict::ConflictGraph;

/// A repaired individual and its fitness.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Genome {
    genes: Vec<bool>,
    fitness: f64,
}

impl Genome {
    pub(crate) fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub(crate) fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Indices of the selected activities, ascending.
    pub(crate) fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &gene)| gene.then_some(i))
    }
}

/// The batch being evolved, with the tables repair needs.
pub(crate) struct Problem<'a> {
    activities: &'a [Activity],
    graph: ConflictGraph,
    /// Repair order: weight desc, end asc, id asc.
    priority: Vec<usize>,
}

impl<'a> Problem<'a> {
    pub(crate) fn new(activities: &'a [Activity]) -> Self {
        let mut priority: Vec<usize> = (0..activities.len()).collect();
        priority.sort_by(|&a, &b| repair_order(&activities[a], &activities[b]));
        Self {
            activities,
            graph: ConflictGraph::build(activities),
            priority,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.activities.len()
    }

    pub(crate) fn activity(&self, index: usize) -> &'a Activity {
        &self.activities[index]
    }

    /// Draws uniformly random genes and repairs them.
    pub(crate) fn random_genome<R: Rng>(&self, rng: &mut R) -> Genome {
        let genes = (0..self.len()).map(|_| rng.gen_bool(0.5)).collect();
        self.evaluate(genes)
    }

    /// Repairs `genes` and scores the result.
    ///
    /// Selected activities are kept in priority order; one that conflicts
    /// with an activity already kept is deselected.
    pub(crate) fn evaluate(&self, genes: Vec<bool>) -> Genome {
        debug_assert_eq!(genes.len(), self.len());
        let mut kept = vec![false; genes.len()];
        let mut fitness = 0.0;
        for &i in &self.priority {
            if !genes[i] {
                continue;
            }
            if self.graph.neighbor_indices(i).any(|j| kept[j]) {
                continue;
            }
            kept[i] = true;
            fitness += self.activities[i].weight();
        }
        Genome {
            genes: kept,
            fitness,
        }
    }
}

fn repair_order(a: &Activity, b: &Activity) -> Ordering {
    b.weight()
        .total_cmp(&a.weight())
        .then_with(|| a.end().value().total_cmp(&b.end().value()))
        .then_with(|| a.id().cmp(&b.id()))
}
