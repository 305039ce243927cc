//! Domain-focused tests for events, instances, and plans.

use super::FixedClock;
use crate::notify::domain::{NotificationPlan, Origin, TaskAssignedEvent, WorkflowInstanceId};
use crate::task::domain::TaskId;
use chrono::{TimeZone, Utc};
use rstest::rstest;

#[rstest]
#[case("https://app.example.com")]
#[case("http://localhost:5173")]
fn origin_accepts_absolute_http_urls(#[case] raw: &str) {
    let origin = Origin::new(raw).expect("valid origin");
    assert_eq!(origin.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("app.example.com")]
#[case("ftp://example.com")]
#[case("https://a b.example.com")]
fn origin_rejects_non_http_values(#[case] raw: &str) {
    assert!(Origin::new(raw).is_err());
}

#[rstest]
fn instance_id_is_deterministic_per_event() {
    let task_id = TaskId::new();
    let origin = Origin::new("https://app.example.com").expect("valid origin");
    let event = TaskAssignedEvent::new(task_id, origin.clone());
    let redelivered = TaskAssignedEvent::new(task_id, origin);

    assert_eq!(
        WorkflowInstanceId::for_event(&event),
        WorkflowInstanceId::for_event(&redelivered)
    );
}

#[rstest]
fn instance_id_differs_across_tasks() {
    let origin = Origin::new("https://app.example.com").expect("valid origin");
    let first = TaskAssignedEvent::new(TaskId::new(), origin.clone());
    let second = TaskAssignedEvent::new(TaskId::new(), origin);

    assert_ne!(
        WorkflowInstanceId::for_event(&first),
        WorkflowInstanceId::for_event(&second)
    );
}

#[rstest]
fn plan_is_immediate_only_for_same_day_due_date() {
    let clock = FixedClock::at(
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    );
    let due_date = Utc
        .with_ymd_and_hms(2026, 3, 10, 23, 30, 0)
        .single()
        .expect("valid timestamp");

    assert_eq!(
        NotificationPlan::for_due_date(due_date, &clock),
        NotificationPlan::ImmediateOnly
    );
}

#[rstest]
fn plan_schedules_reminder_for_future_due_date() {
    let clock = FixedClock::at(
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    );
    let due_date = Utc
        .with_ymd_and_hms(2026, 3, 14, 17, 0, 0)
        .single()
        .expect("valid timestamp");

    assert_eq!(
        NotificationPlan::for_due_date(due_date, &clock),
        NotificationPlan::ImmediateThenReminder {
            resume_at: due_date
        }
    );
}

#[rstest]
fn plan_survives_journal_round_trip() {
    let due_date = Utc
        .with_ymd_and_hms(2026, 3, 14, 17, 0, 0)
        .single()
        .expect("valid timestamp");
    let plan = NotificationPlan::ImmediateThenReminder {
        resume_at: due_date,
    };

    let value = serde_json::to_value(plan).expect("plan serializes");
    let decoded: NotificationPlan =
        serde_json::from_value(value).expect("plan deserializes");
    assert_eq!(decoded, plan);
}
