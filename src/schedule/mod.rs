use crate::activity::{Activity, Minutes};
use crate::interval::Interval;
use crate::Id;
use qtty::{Minute, Quantity};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
pub mod entry_key;
pub mod errors;
use entry_key::*;
pub use errors::*;

#[cfg(test)]
mod tests;

/// How much a [`Schedule`] can be trusted with respect to its scheduler's objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Optimality {
    /// Proven optimal for the scheduler's objective (count or weight).
    Optimal,
    /// An exact search was cut short by its budget; best result found so far.
    BestEffort,
    /// Produced by a metaheuristic that carries no optimality guarantee.
    Heuristic,
}

impl Optimality {
    pub fn is_optimal(&self) -> bool {
        matches!(self, Optimality::Optimal)
    }
}

impl fmt::Display for Optimality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optimality::Optimal => write!(f, "optimal"),
            Optimality::BestEffort => write!(f, "best-effort"),
            Optimality::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Conflict-free set of activities ordered by start time.
///
/// A `Schedule` is the result of one scheduler invocation. It is built once
/// through [`Schedule::from_activities`], which rejects overlapping or
/// duplicate entries, and offers no way to mutate it afterwards.
///
/// # Internal Structure
/// - `by_start`: `BTreeMap` from start time to activity
/// - `start_by_id`: `HashMap` from activity ID to start time
///
/// Positive-length activities that do not overlap always have distinct start
/// times, which is what makes `by_start` a valid index.
///
/// # Complexity
/// - construction: O(n log n), with O(1) neighbour overlap checks per insert
/// - `get`: O(1) hash lookup + O(log n) tree lookup
/// - `conflicts`: O(log n + k) where k is the number of conflicts
/// - `activity_at`: O(log n)
///
/// # Examples
///
/// ```
/// use cfsched::activity::Activity;
/// use cfsched::interval::Interval;
/// use cfsched::schedule::{Optimality, Schedule};
/// use qtty::Quantity;
///
/// let schedule = Schedule::from_activities(
///     vec![
///         Activity::from_minutes(1, 0.0, 90.0).with_weight(3.0),
///         Activity::from_minutes(2, 90.0, 180.0).with_weight(3.0),
///     ],
///     Optimality::Optimal,
/// )
/// .unwrap();
///
/// assert_eq!(schedule.count(), 2);
/// assert_eq!(schedule.total_weight(), 6.0);
///
/// // Back-to-back sessions leave no free slot in between.
/// assert!(!schedule.is_free(Interval::from_f64(60.0, 120.0)).unwrap());
/// assert!(schedule.is_free(Interval::from_f64(180.0, 200.0)).unwrap());
///
/// assert_eq!(schedule.activity_at(Quantity::new(90.0)).unwrap().map(|a| a.id()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    by_start: BTreeMap<F64Key, Activity>,
    start_by_id: HashMap<Id, F64Key>,
    optimality: Optimality,
}

impl Schedule {
    /// Creates an empty schedule (count 0, total weight 0).
    pub fn empty(optimality: Optimality) -> Self {
        Self {
            by_start: BTreeMap::new(),
            start_by_id: HashMap::new(),
            optimality,
        }
    }

    /// Builds a schedule from activities given in any order.
    ///
    /// # Errors
    ///
    /// - `DuplicateActivityId` if two activities share an id
    /// - `NaNTime` if a start or end is NaN
    /// - `OverlapsExisting` if two activities overlap
    pub fn from_activities<I>(activities: I, optimality: Optimality) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = Activity>,
    {
        let mut schedule = Self::empty(optimality);
        for activity in activities {
            schedule.insert(activity)?;
        }
        Ok(schedule)
    }

    fn key(q: Minutes) -> Result<F64Key, ScheduleError> {
        let v = q.value();
        if v.is_nan() {
            Err(ScheduleError::NaNTime)
        } else {
            Ok(F64Key(v))
        }
    }

    /// Inserts an activity.
    ///
    /// Only predecessor and successor checks are needed because the schedule
    /// is kept non-overlapping and sorted by start time.
    fn insert(&mut self, activity: Activity) -> Result<(), ScheduleError> {
        let id = activity.id();
        if self.contains(id) {
            return Err(ScheduleError::DuplicateActivityId(id));
        }

        let start_k = Self::key(activity.start())?;
        Self::key(activity.end())?;

        // Predecessor: latest activity with start <= new.start.
        if let Some((_k, prev)) = self.by_start.range(..=start_k).next_back() {
            if prev.overlaps(&activity) {
                return Err(ScheduleError::OverlapsExisting {
                    new_id: id,
                    existing_id: prev.id(),
                });
            }
        }

        // Successor: earliest activity with start >= new.start.
        if let Some((_k, next)) = self.by_start.range(start_k..).next() {
            if next.overlaps(&activity) || next.start().value() == activity.start().value() {
                return Err(ScheduleError::OverlapsExisting {
                    new_id: id,
                    existing_id: next.id(),
                });
            }
        }

        self.by_start.insert(start_k, activity);
        self.start_by_id.insert(id, start_k);
        Ok(())
    }

    /// Number of scheduled activities.
    pub fn count(&self) -> usize {
        self.by_start.len()
    }

    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }

    /// Sum of the weights of all scheduled activities.
    pub fn total_weight(&self) -> f64 {
        self.by_start.values().map(Activity::weight).sum()
    }

    pub fn optimality(&self) -> Optimality {
        self.optimality
    }

    /// Returns true if activity id exists.
    pub fn contains(&self, id: Id) -> bool {
        self.start_by_id.contains_key(&id)
    }

    /// Gets a scheduled activity by id.
    pub fn get(&self, id: Id) -> Option<&Activity> {
        let start = self.start_by_id.get(&id)?;
        self.by_start.get(start)
    }

    /// Iterates over all scheduled activities in start time order.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> + '_ {
        self.by_start.values()
    }

    /// Activity ids in start time order.
    pub fn ids(&self) -> Vec<Id> {
        self.by_start.values().map(Activity::id).collect()
    }

    /// Consumes the schedule, returning its activities in start time order.
    pub fn into_activities(self) -> Vec<Activity> {
        self.by_start.into_values().collect()
    }

    /// Iterates over all scheduled activities overlapping `query`.
    ///
    /// Complexity: O(log n + k) where k is the number of conflicts.
    pub fn conflicts<'a>(
        &'a self,
        query: Interval<Minute>,
    ) -> Result<impl Iterator<Item = &'a Activity> + 'a, ScheduleError> {
        let q_start_k = Self::key(query.start())?;
        let q_end = Self::key(query.end())?.value();

        // The predecessor of q_start may start earlier and still reach into the query.
        let range_start = match self.by_start.range(..=q_start_k).next_back() {
            Some((k, prev)) if prev.end().value() > query.start().value() => *k,
            _ => q_start_k,
        };

        let iter = self
            .by_start
            .range(range_start..)
            .take_while(move |(k, _a)| k.value() < q_end)
            .map(|(_k, a)| a)
            .filter(move |a| {
                a.start().value() < query.end().value() && query.start().value() < a.end().value()
            });

        Ok(iter)
    }

    /// Returns true if `query` overlaps any scheduled activity.
    pub fn has_conflict(&self, query: Interval<Minute>) -> Result<bool, ScheduleError> {
        Ok(self.conflicts(query)?.next().is_some())
    }

    /// Checks if an interval is free of scheduled activities.
    pub fn is_free(&self, query: Interval<Minute>) -> Result<bool, ScheduleError> {
        Ok(!self.has_conflict(query)?)
    }

    /// Finds the activity running at `pos`, if any.
    ///
    /// Complexity: O(log n).
    pub fn activity_at(&self, pos: Minutes) -> Result<Option<&Activity>, ScheduleError> {
        let p = Self::key(pos)?;
        if let Some((_k, a)) = self.by_start.range(..=p).next_back() {
            if pos.value() < a.end().value() {
                return Ok(Some(a));
            }
        }
        Ok(None)
    }

    /// Returns the total scheduled duration (sum of all activity durations).
    ///
    /// Note: this does NOT account for gaps between activities.
    pub fn total_duration(&self) -> Minutes {
        self.by_start
            .values()
            .map(|a| a.duration())
            .fold(Quantity::new(0.0), |acc, dur| acc + dur)
    }

    /// Returns the earliest start time in the schedule, if any.
    pub fn earliest_start(&self) -> Option<Minutes> {
        self.by_start.values().next().map(|a| a.start())
    }

    /// Returns the latest end time in the schedule, if any.
    pub fn latest_end(&self) -> Option<Minutes> {
        self.by_start.values().next_back().map(|a| a.end())
    }

    /// Returns the time span from earliest start to latest end, if any activities exist.
    pub fn span(&self) -> Option<Minutes> {
        if let (Some(start), Some(end)) = (self.earliest_start(), self.latest_end()) {
            Some(end - start)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Activity;
    type IntoIter = std::collections::btree_map::Values<'a, F64Key, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_start.values()
    }
}

// =============================================================================
// Schedule Serde Support
// =============================================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::de;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Schedule {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let activities: Vec<&Activity> = self.iter().collect();
            let mut s = serializer.serialize_struct("Schedule", 4)?;
            s.serialize_field("count", &self.count())?;
            s.serialize_field("total_weight", &self.total_weight())?;
            s.serialize_field("optimality", &self.optimality)?;
            s.serialize_field("activities", &activities)?;
            s.end()
        }
    }

    /// Derived fields (`count`, `total_weight`) are recomputed, not trusted.
    #[derive(Deserialize)]
    struct Raw {
        optimality: Optimality,
        activities: Vec<Activity>,
    }

    impl<'de> Deserialize<'de> for Schedule {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Raw::deserialize(deserializer)?;
            Schedule::from_activities(raw.activities, raw.optimality).map_err(de::Error::custom)
        }
    }
}
