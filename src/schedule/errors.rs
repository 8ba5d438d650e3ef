use thiserror::Error;

use crate::Id;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Activity ID {0} already exists in schedule")]
    DuplicateActivityId(Id),

    #[error("Time value cannot be NaN")]
    NaNTime,

    #[error("Activity {new_id} overlaps with existing activity {existing_id}")]
    OverlapsExisting { new_id: Id, existing_id: Id },
}
