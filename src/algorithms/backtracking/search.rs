//! Depth-first include/exclude search with weight-bound pruning.
//!
//! The search walks activities sorted by start time. At each node the
//! activities that start before the current frontier (end of the last
//! included activity) are skipped, since they conflict with it. The node is
//! then pruned when even taking every remaining activity could not beat the
//! incumbent. Children are explored include-first, which finds heavy
//! incumbents early and tightens the bound.
//!
//! The search uses an explicit stack, so its depth is not limited by the
//! thread's call stack.

use super::budget::BudgetClock;
use crate::activity::Activity;

/// One pending search node.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Next activity to decide on.
    index: usize,
    /// End of the last included activity.
    frontier: f64,
    /// Weight of the included activities.
    weight: f64,
    /// Length of the shared `chosen` stack for this node's parent.
    depth: usize,
    /// Activity included on the edge leading to this node.
    include: Option<usize>,
}

impl Frame {
    fn root() -> Self {
        Self {
            index: 0,
            frontier: f64::NEG_INFINITY,
            weight: 0.0,
            depth: 0,
            include: None,
        }
    }
}

/// Result of [`Search::run`].
#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome {
    /// Indices into the sorted slice, ascending.
    pub(crate) best: Vec<usize>,
    pub(crate) best_weight: f64,
    /// True when the budget stopped the search early.
    pub(crate) exhausted: bool,
    pub(crate) steps: u64,
}

/// Precomputed tables over activities sorted by start time.
pub(crate) struct Search<'a> {
    activities: &'a [&'a Activity],
    starts: Vec<f64>,
    /// `suffix_weight[i]` = total weight of `activities[i..]`.
    suffix_weight: Vec<f64>,
    mandatory: Vec<bool>,
    /// `mandatory_prefix[i]` = number of mandatory activities in `activities[..i]`.
    mandatory_prefix: Vec<usize>,
}

impl<'a> Search<'a> {
    /// `activities` must be sorted by start time.
    pub(crate) fn new(activities: &'a [&'a Activity], mandatory: Vec<bool>) -> Self {
        let n = activities.len();
        let starts: Vec<f64> = activities.iter().map(|a| a.start().value()).collect();

        let mut suffix_weight = vec![0.0; n + 1];
        for i in (0..n).rev() {
            suffix_weight[i] = suffix_weight[i + 1] + activities[i].weight();
        }

        let mut mandatory_prefix = vec![0; n + 1];
        for i in 0..n {
            mandatory_prefix[i + 1] = mandatory_prefix[i] + usize::from(mandatory[i]);
        }

        Self {
            activities,
            starts,
            suffix_weight,
            mandatory,
            mandatory_prefix,
        }
    }

    fn len(&self) -> usize {
        self.activities.len()
    }

    fn mandatory_between(&self, from: usize, to: usize) -> usize {
        self.mandatory_prefix[to] - self.mandatory_prefix[from]
    }

    /// First index `>= from` whose activity starts at or after `frontier`.
    fn first_fitting(&self, from: usize, frontier: f64) -> usize {
        from + self.starts[from..].partition_point(|&s| s < frontier)
    }

    /// Finds a maximum-weight conflict-free subset containing every mandatory activity.
    ///
    /// `incumbent` must be a feasible selection containing all mandatory
    /// activities (the mandatory set itself works). It is replaced only by a
    /// strictly heavier selection.
    pub(crate) fn run(&self, incumbent: Vec<usize>, clock: &mut BudgetClock) -> SearchOutcome {
        let n = self.len();
        let mut best_weight: f64 = incumbent.iter().map(|&i| self.activities[i].weight()).sum();
        let mut best = incumbent;
        let mut exhausted = false;

        let mut chosen: Vec<usize> = Vec::new();
        let mut stack = vec![Frame::root()];

        while let Some(frame) = stack.pop() {
            if clock.tick() {
                exhausted = true;
                break;
            }

            chosen.truncate(frame.depth);
            if let Some(j) = frame.include {
                chosen.push(j);
            }

            let index = self.first_fitting(frame.index, frame.frontier);
            if self.mandatory_between(frame.index, index) > 0 {
                // A mandatory activity no longer fits.
                continue;
            }

            if self.mandatory_between(index, n) == 0 && frame.weight > best_weight {
                best_weight = frame.weight;
                best = chosen.clone();
            }

            if index == n || frame.weight + self.suffix_weight[index] <= best_weight {
                continue;
            }

            let activity = self.activities[index];
            if !self.mandatory[index] {
                stack.push(Frame {
                    index: index + 1,
                    depth: chosen.len(),
                    include: None,
                    ..frame
                });
            }
            stack.push(Frame {
                index: index + 1,
                frontier: activity.end().value(),
                weight: frame.weight + activity.weight(),
                depth: chosen.len(),
                include: Some(index),
            });
        }

        SearchOutcome {
            best,
            best_weight,
            exhausted,
            steps: clock.steps(),
        }
    }

    /// Lists conflict-free selections containing every mandatory activity,
    /// exclude-first, stopping after `limit` selections.
    pub(crate) fn enumerate(&self, limit: usize) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut found = Vec::new();
        let mut chosen: Vec<usize> = Vec::new();
        let mut stack = vec![Frame::root()];

        while let Some(frame) = stack.pop() {
            if found.len() >= limit {
                break;
            }

            chosen.truncate(frame.depth);
            if let Some(j) = frame.include {
                chosen.push(j);
            }

            if frame.index == n {
                found.push(chosen.clone());
                continue;
            }

            let activity = self.activities[frame.index];
            if self.starts[frame.index] >= frame.frontier {
                stack.push(Frame {
                    index: frame.index + 1,
                    frontier: activity.end().value(),
                    weight: frame.weight + activity.weight(),
                    depth: chosen.len(),
                    include: Some(frame.index),
                });
            }
            if !self.mandatory[frame.index] {
                stack.push(Frame {
                    index: frame.index + 1,
                    depth: chosen.len(),
                    include: None,
                    ..frame
                });
            }
        }

        found
    }
}
