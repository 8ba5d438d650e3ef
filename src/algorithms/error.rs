use thiserror::Error;

use super::genetic::ConfigError;
use crate::schedule::ScheduleError;
use crate::Id;

/// Why an activity was rejected at the scheduler boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidActivityReason {
    /// `end <= start`: zero-length or reversed interval.
    EmptyInterval,
    /// `start < 0`.
    NegativeStart,
    /// A start or end time is NaN or infinite.
    NonFiniteTime,
    /// `weight < 0`.
    NegativeWeight,
    /// The weight is NaN or infinite.
    NonFiniteWeight,
    /// Another activity of the same batch already uses this id.
    DuplicateId,
}

impl std::fmt::Display for InvalidActivityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidActivityReason::EmptyInterval => "end must be after start",
            InvalidActivityReason::NegativeStart => "start must not be negative",
            InvalidActivityReason::NonFiniteTime => "start and end must be finite",
            InvalidActivityReason::NegativeWeight => "weight must not be negative",
            InvalidActivityReason::NonFiniteWeight => "weight must be finite",
            InvalidActivityReason::DuplicateId => "id is used more than once",
        };
        f.write_str(text)
    }
}

/// Errors surfaced synchronously by every scheduler before any scheduling work.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulingError {
    #[error("Invalid activity {id}: {reason}")]
    InvalidActivity {
        id: Id,
        reason: InvalidActivityReason,
    },

    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Constraints cannot be satisfied: {0}")]
    InfeasibleConstraints(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl SchedulingError {
    pub(crate) fn invalid(id: Id, reason: InvalidActivityReason) -> Self {
        SchedulingError::InvalidActivity { id, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_activity_display() {
        let e = SchedulingError::invalid(7, InvalidActivityReason::EmptyInterval);
        assert_eq!(e.to_string(), "Invalid activity 7: end must be after start");
    }

    #[test]
    fn configuration_error_converts() {
        let e: SchedulingError = ConfigError::InvalidPopulationSize.into();
        assert!(matches!(e, SchedulingError::Configuration(_)));
        assert!(e.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn schedule_error_is_transparent() {
        let e: SchedulingError = ScheduleError::NaNTime.into();
        assert_eq!(e.to_string(), "Time value cannot be NaN");
    }
}
