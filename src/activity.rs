//! The activity record consumed by every scheduler.

use std::fmt;

use qtty::{Minute, Quantity};

use crate::interval::Interval;
use crate::Id;

/// Time measured in minutes from a caller-chosen reference epoch.
pub type Minutes = Quantity<Minute>;

/// Default weight of an activity whose producer did not specify one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A weighted, time-bounded activity (for instance one course session).
///
/// Activities are plain values: schedulers never mutate them and only clone
/// them into the [`Schedule`](crate::schedule::Schedule) they return. A
/// well-formed activity has `0 <= start < end` and a finite, non-negative
/// weight; those rules are checked by
/// [`validate_activities`](crate::validation::validate_activities) when a
/// batch reaches a scheduler, not on construction.
///
/// `name` and `room` are display labels only. No algorithm looks at them.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    id: Id,
    start: Minutes,
    end: Minutes,
    weight: f64,
    name: String,
    room: String,
}

impl Activity {
    /// Creates an activity with the default weight and empty labels.
    pub fn new(id: Id, start: Minutes, end: Minutes) -> Self {
        Self {
            id,
            start,
            end,
            weight: DEFAULT_WEIGHT,
            name: String::new(),
            room: String::new(),
        }
    }

    /// Creates an activity from raw minute values.
    pub fn from_minutes(id: Id, start: f64, end: f64) -> Self {
        Self::new(id, Quantity::new(start), Quantity::new(end))
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn start(&self) -> Minutes {
        self.start
    }

    pub fn end(&self) -> Minutes {
        self.end
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }

    /// Returns the occupied interval `[start, end)`, or `None` when the bounds are reversed or NaN.
    pub fn interval(&self) -> Option<Interval<Minute>> {
        Interval::try_new(self.start, self.end)
    }

    /// Returns true if this activity overlaps `other` in time.
    ///
    /// See [`conflicts`](crate::conflict::conflicts).
    pub fn overlaps(&self, other: &Activity) -> bool {
        crate::conflict::conflicts(self, other)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Activity {}: start={}, end={}, weight={}",
            self.id,
            self.start.value(),
            self.end.value(),
            self.weight
        )
    }
}

// =============================================================================
// Activity Serde Support
// =============================================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Activity {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut s = serializer.serialize_struct("Activity", 6)?;
            s.serialize_field("id", &self.id)?;
            s.serialize_field("start", &self.start.value())?;
            s.serialize_field("end", &self.end.value())?;
            s.serialize_field("weight", &self.weight)?;
            s.serialize_field("name", &self.name)?;
            s.serialize_field("room", &self.room)?;
            s.end()
        }
    }

    fn default_weight() -> f64 {
        DEFAULT_WEIGHT
    }

    /// Wire shape shared with file and database collaborators.
    #[derive(Deserialize)]
    struct Raw {
        id: Id,
        start: f64,
        end: f64,
        #[serde(default = "default_weight")]
        weight: f64,
        #[serde(default)]
        name: String,
        #[serde(default)]
        room: String,
    }

    impl<'de> Deserialize<'de> for Activity {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Raw::deserialize(deserializer)?;
            Ok(Activity::from_minutes(raw.id, raw.start, raw.end)
                .with_weight(raw.weight)
                .with_name(raw.name)
                .with_room(raw.room))
        }
    }
}
