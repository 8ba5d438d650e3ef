use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use super::{conflicts, Coloring};
use crate::activity::Activity;
use crate::Id;

/// Undirected conflict graph over a batch of activities.
///
/// # Invariants
///
/// - Node `i` corresponds to `activities[i]` of the slice passed to [`build`](Self::build)
/// - An edge joins two nodes iff their activities [`conflict`](super::conflicts)
/// - Activity ids are expected to be unique; with duplicates, id lookups resolve to
///   the last occurrence
#[derive(Debug, Clone)]
pub struct ConflictGraph {
    graph: UnGraph<Id, ()>,
    node_by_id: HashMap<Id, NodeIndex>,
}

impl ConflictGraph {
    /// Builds the conflict graph of `activities`.
    ///
    /// Uses a sweep over activities sorted by start time, so the cost is
    /// O(n log n + m) where m is the number of conflicting pairs.
    pub fn build(activities: &[Activity]) -> Self {
        let mut graph = UnGraph::with_capacity(activities.len(), activities.len());
        let mut node_by_id = HashMap::with_capacity(activities.len());
        for activity in activities {
            let node = graph.add_node(activity.id());
            node_by_id.insert(activity.id(), node);
        }

        let mut by_start: Vec<usize> = (0..activities.len()).collect();
        by_start.sort_by(|&a, &b| {
            activities[a]
                .start()
                .value()
                .total_cmp(&activities[b].start().value())
        });

        for (pos, &i) in by_start.iter().enumerate() {
            let end_i = activities[i].end().value();
            for &j in &by_start[pos + 1..] {
                // Everything after this starts at or past `end_i`.
                if activities[j].start().value() >= end_i {
                    break;
                }
                if conflicts(&activities[i], &activities[j]) {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
                }
            }
        }

        Self { graph, node_by_id }
    }

    /// Number of activities (vertices).
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of conflicting pairs (edges).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of activities conflicting with `id`, or `None` for an unknown id.
    pub fn degree(&self, id: Id) -> Option<usize> {
        let node = self.node_by_id.get(&id)?;
        Some(self.graph.neighbors(*node).count())
    }

    /// Ids of the activities conflicting with `id`, sorted ascending.
    ///
    /// Returns an empty vector for an unknown id.
    pub fn neighbors(&self, id: Id) -> Vec<Id> {
        let Some(node) = self.node_by_id.get(&id) else {
            return Vec::new();
        };
        let mut ids: Vec<Id> = self
            .graph
            .neighbors(*node)
            .filter_map(|n| self.graph.node_weight(n).copied())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Positions (indices into the input slice) conflicting with position `index`.
    pub fn neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors(NodeIndex::new(index))
            .map(|n| n.index())
    }

    /// Returns true if the activities with ids `a` and `b` conflict.
    pub fn contains_conflict(&self, a: Id, b: Id) -> bool {
        match (self.node_by_id.get(&a), self.node_by_id.get(&b)) {
            (Some(&na), Some(&nb)) => self.graph.find_edge(na, nb).is_some(),
            _ => false,
        }
    }

    /// Colours the graph with the Welsh-Powell heuristic.
    ///
    /// Vertices are visited by degree descending (ties by id ascending) and each
    /// receives the smallest slot index not used by an already coloured
    /// neighbour. Activities sharing a slot never conflict, so the slot count is
    /// the number of parallel tracks needed to run the whole batch.
    pub fn welsh_powell(&self) -> Coloring {
        let mut order: Vec<NodeIndex> = self.graph.node_indices().collect();
        order.sort_by(|&a, &b| {
            let degree_a = self.graph.neighbors(a).count();
            let degree_b = self.graph.neighbors(b).count();
            degree_b
                .cmp(&degree_a)
                .then_with(|| self.graph[a].cmp(&self.graph[b]))
        });

        let mut slot_of_node: Vec<Option<usize>> = vec![None; self.graph.node_count()];
        for node in order {
            let mut used: Vec<usize> = self
                .graph
                .neighbors(node)
                .filter_map(|n| slot_of_node[n.index()])
                .collect();
            used.sort_unstable();
            used.dedup();

            let mut slot = 0;
            for taken in used {
                if taken == slot {
                    slot += 1;
                } else if taken > slot {
                    break;
                }
            }
            slot_of_node[node.index()] = Some(slot);
        }

        let assignment = self
            .graph
            .node_indices()
            .filter_map(|n| slot_of_node[n.index()].map(|slot| (self.graph[n], slot)))
            .collect();
        Coloring::new(assignment)
    }
}
