//! Conflict detection between activities.
//!
//! Two activities conflict when their half-open intervals `[start, end)`
//! overlap. Activities that merely touch (`a.end == b.start`) do not conflict,
//! so back-to-back sessions can share a schedule.
//!
//! - [`conflicts`] is the pairwise predicate every scheduler relies on.
//! - [`ConflictGraph`] materializes all pairwise conflicts of a batch as an
//!   undirected graph and supports Welsh-Powell colouring (see [`Coloring`]).

mod coloring;
mod graph;

pub use coloring::Coloring;
pub use graph::ConflictGraph;

use crate::activity::Activity;

/// Returns true iff `[a.start, a.end)` and `[b.start, b.end)` overlap.
#[inline]
pub fn conflicts(a: &Activity, b: &Activity) -> bool {
    a.start().value() < b.end().value() && b.start().value() < a.end().value()
}

/// Returns true if no two activities in `activities` conflict.
///
/// Complexity: O(n log n).
pub fn is_conflict_free<'a, I>(activities: I) -> bool
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut sorted: Vec<&Activity> = activities.into_iter().collect();
    sorted.sort_by(|a, b| a.start().value().total_cmp(&b.start().value()));
    sorted
        .windows(2)
        .all(|pair| pair[0].end().value() <= pair[1].start().value())
}
