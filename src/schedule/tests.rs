//! Test suite for the Schedule module.

use super::*;

type TestInterval = Interval<Minute>;

/// Helper to create intervals more concisely in tests.
fn iv(start: f64, end: f64) -> TestInterval {
    Interval::from_f64(start, end)
}

/// Helper to create a quantity.
fn q(value: f64) -> Minutes {
    Quantity::new(value)
}

fn act(id: Id, start: f64, end: f64, weight: f64) -> Activity {
    Activity::from_minutes(id, start, end).with_weight(weight)
}

fn build(activities: Vec<Activity>) -> Schedule {
    Schedule::from_activities(activities, Optimality::Optimal).unwrap()
}

#[cfg(test)]
mod basic_operations {
    use super::*;

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::empty(Optimality::Optimal);
        assert!(schedule.is_empty());
        assert_eq!(schedule.count(), 0);
        assert_eq!(schedule.total_weight(), 0.0);
        assert_eq!(schedule.span(), None);
    }

    #[test]
    fn test_from_unordered_activities_is_chronological() {
        let schedule = build(vec![
            act(3, 200.0, 290.0, 3.0),
            act(1, 0.0, 90.0, 3.0),
            act(2, 100.0, 190.0, 1.5),
        ]);
        assert_eq!(schedule.ids(), vec![1, 2, 3]);
        assert_eq!(schedule.count(), 3);
        assert_eq!(schedule.total_weight(), 7.5);
    }

    #[test]
    fn test_duplicate_id_fails() {
        let result = Schedule::from_activities(
            vec![act(1, 0.0, 10.0, 1.0), act(1, 20.0, 30.0, 1.0)],
            Optimality::Optimal,
        );
        assert_eq!(result, Err(ScheduleError::DuplicateActivityId(1)));
    }

    #[test]
    fn test_nan_time_fails() {
        let result = Schedule::from_activities(
            vec![act(1, f64::NAN, 10.0, 1.0)],
            Optimality::Optimal,
        );
        assert_eq!(result, Err(ScheduleError::NaNTime));
    }

    #[test]
    fn test_get_and_contains() {
        let schedule = build(vec![act(1, 0.0, 10.0, 1.0), act(2, 20.0, 30.0, 2.0)]);
        assert!(schedule.contains(1));
        assert!(!schedule.contains(999));
        assert_eq!(schedule.get(2).map(Activity::weight), Some(2.0));
        assert!(schedule.get(999).is_none());
    }

    #[test]
    fn test_into_activities_keeps_order() {
        let schedule = build(vec![act(2, 20.0, 30.0, 1.0), act(1, 0.0, 10.0, 1.0)]);
        let ids: Vec<Id> = schedule.into_activities().iter().map(Activity::id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_optimality_is_kept() {
        let schedule = Schedule::empty(Optimality::BestEffort);
        assert_eq!(schedule.optimality(), Optimality::BestEffort);
        assert!(!schedule.optimality().is_optimal());
        assert_eq!(Optimality::Heuristic.to_string(), "heuristic");
    }
}

#[cfg(test)]
mod overlap_detection {
    use super::*;

    #[test]
    fn test_touching_activities_accepted() {
        let schedule = build(vec![act(1, 0.0, 50.0, 1.0), act(2, 50.0, 100.0, 1.0)]);
        assert_eq!(schedule.count(), 2);
    }

    #[test]
    fn test_overlap_with_predecessor_rejected() {
        let result = Schedule::from_activities(
            vec![act(1, 0.0, 10.0, 1.0), act(2, 5.0, 15.0, 1.0)],
            Optimality::Optimal,
        );
        assert_eq!(
            result,
            Err(ScheduleError::OverlapsExisting {
                new_id: 2,
                existing_id: 1
            })
        );
    }

    #[test]
    fn test_overlap_with_successor_rejected() {
        let result = Schedule::from_activities(
            vec![act(1, 10.0, 20.0, 1.0), act(2, 5.0, 15.0, 1.0)],
            Optimality::Optimal,
        );
        assert!(matches!(
            result,
            Err(ScheduleError::OverlapsExisting { new_id: 2, existing_id: 1 })
        ));
    }

    #[test]
    fn test_same_start_rejected() {
        let result = Schedule::from_activities(
            vec![act(1, 0.0, 10.0, 1.0), act(2, 0.0, 10.0, 1.0)],
            Optimality::Optimal,
        );
        assert!(matches!(result, Err(ScheduleError::OverlapsExisting { .. })));
    }

    #[test]
    fn test_nested_activity_rejected() {
        let result = Schedule::from_activities(
            vec![act(1, 0.0, 100.0, 1.0), act(2, 40.0, 60.0, 1.0)],
            Optimality::Optimal,
        );
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod queries {
    use super::*;

    fn sample() -> Schedule {
        build(vec![
            act(1, 0.0, 10.0, 1.0),
            act(2, 15.0, 25.0, 1.0),
            act(3, 30.0, 40.0, 1.0),
        ])
    }

    #[test]
    fn test_conflicts_spanning_two_activities() {
        let schedule = sample();
        let ids: Vec<Id> = schedule
            .conflicts(iv(8.0, 20.0))
            .unwrap()
            .map(Activity::id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_conflicts_ignore_touching_neighbours() {
        let schedule = sample();
        assert!(schedule.is_free(iv(10.0, 15.0)).unwrap());
        assert!(schedule.is_free(iv(25.0, 30.0)).unwrap());
        assert!(schedule.has_conflict(iv(24.0, 30.0)).unwrap());
    }

    #[test]
    fn test_activity_at() {
        let schedule = sample();
        assert_eq!(schedule.activity_at(q(5.0)).unwrap().map(Activity::id), Some(1));
        assert_eq!(schedule.activity_at(q(10.0)).unwrap().map(Activity::id), None);
        assert_eq!(schedule.activity_at(q(12.0)).unwrap().map(Activity::id), None);
        assert_eq!(schedule.activity_at(q(15.0)).unwrap().map(Activity::id), Some(2));
        assert_eq!(schedule.activity_at(q(f64::NAN)), Err(ScheduleError::NaNTime));
    }

    #[test]
    fn test_durations_and_span() {
        let schedule = sample();
        assert_eq!(schedule.total_duration().value(), 30.0);
        assert_eq!(schedule.earliest_start().map(|t| t.value()), Some(0.0));
        assert_eq!(schedule.latest_end().map(|t| t.value()), Some(40.0));
        assert_eq!(schedule.span().map(|t| t.value()), Some(40.0));
    }

    #[test]
    fn test_iteration_by_reference() {
        let schedule = sample();
        let mut starts = Vec::new();
        for activity in &schedule {
            starts.push(activity.start().value());
        }
        assert_eq!(starts, vec![0.0, 15.0, 30.0]);
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::*;

    #[test]
    fn test_round_trip_through_json() {
        let schedule = build(vec![act(1, 0.0, 90.0, 3.0), act(2, 90.0, 180.0, 3.0)]);
        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn test_serialized_shape_has_derived_fields() {
        let schedule = build(vec![act(1, 0.0, 90.0, 3.0)]);
        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["total_weight"], 3.0);
        assert_eq!(value["optimality"], "optimal");
        assert_eq!(value["activities"][0]["id"], 1);
    }

    #[test]
    fn test_overlapping_input_rejected() {
        let json = r#"{
            "optimality": "optimal",
            "activities": [
                {"id": 1, "start": 0, "end": 10},
                {"id": 2, "start": 5, "end": 15}
            ]
        }"#;
        assert!(serde_json::from_str::<Schedule>(json).is_err());
    }
}
