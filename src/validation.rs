//! Input validation at the scheduler boundary.
//!
//! Every scheduler calls [`validate_activities`] before doing any work, so a
//! malformed batch is rejected as a whole and no partial schedule is produced.
//! Checks, in order, per activity:
//! 1. start and end are finite
//! 2. start is not negative
//! 3. end is strictly after start
//! 4. weight is finite and not negative
//! 5. the id has not been seen earlier in the batch
//!
//! The first failing activity is reported; an empty batch is valid.

use std::collections::HashSet;

use crate::activity::Activity;
use crate::algorithms::{InvalidActivityReason, SchedulingError};

/// Checks a single activity in isolation (everything except id uniqueness).
pub fn validate_activity(activity: &Activity) -> Result<(), SchedulingError> {
    let start = activity.start().value();
    let end = activity.end().value();
    let fail = |reason| Err(SchedulingError::invalid(activity.id(), reason));

    if !start.is_finite() || !end.is_finite() {
        return fail(InvalidActivityReason::NonFiniteTime);
    }
    if start < 0.0 {
        return fail(InvalidActivityReason::NegativeStart);
    }
    if end <= start {
        return fail(InvalidActivityReason::EmptyInterval);
    }
    if !activity.weight().is_finite() {
        return fail(InvalidActivityReason::NonFiniteWeight);
    }
    if activity.weight() < 0.0 {
        return fail(InvalidActivityReason::NegativeWeight);
    }
    Ok(())
}

/// Validates a whole batch, failing fast on the first invalid activity.
pub fn validate_activities(activities: &[Activity]) -> Result<(), SchedulingError> {
    let mut seen = HashSet::with_capacity(activities.len());
    for activity in activities {
        validate_activity(activity)?;
        if !seen.insert(activity.id()) {
            return Err(SchedulingError::invalid(
                activity.id(),
                InvalidActivityReason::DuplicateId,
            ));
        }
    }
    Ok(())
}
