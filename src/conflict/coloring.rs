use std::collections::BTreeMap;

use crate::Id;

/// Slot assignment produced by [`ConflictGraph::welsh_powell`](super::ConflictGraph::welsh_powell).
///
/// Slots are dense indices starting at 0. Two activities in the same slot never conflict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Coloring {
    slot_by_id: BTreeMap<Id, usize>,
    slot_count: usize,
}

impl Coloring {
    pub(crate) fn new(slot_by_id: BTreeMap<Id, usize>) -> Self {
        let slot_count = slot_by_id.values().max().map_or(0, |max| max + 1);
        Self {
            slot_by_id,
            slot_count,
        }
    }

    /// Number of distinct slots used.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Slot assigned to the activity `id`.
    pub fn slot_of(&self, id: Id) -> Option<usize> {
        self.slot_by_id.get(&id).copied()
    }

    /// Ids grouped per slot, each group sorted by id.
    pub fn groups(&self) -> Vec<Vec<Id>> {
        let mut groups = vec![Vec::new(); self.slot_count];
        for (&id, &slot) in &self.slot_by_id {
            groups[slot].push(id);
        }
        groups
    }

    /// Iterates `(id, slot)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, usize)> + '_ {
        self.slot_by_id.iter().map(|(&id, &slot)| (id, slot))
    }
}
