//! Domain-focused tests for the task record and patch application.

use crate::task::domain::{
    ParseTaskPriorityError, ParseTaskStatusError, PersistedTaskData, Task, TaskId, TaskPatch,
    TaskPriority, TaskStatus,
};
use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

fn timestamp(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn sample_task() -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(1),
        title: "Write report".to_owned(),
        description: Some("Quarterly numbers".to_owned()),
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        created_at: timestamp(9),
        updated_at: None,
        due_date: None,
        assigned_to: Some("omar".to_owned()),
    })
}

#[rstest]
#[case(TaskStatus::Pending, "pending")]
#[case(TaskStatus::InProgress, "in_progress")]
#[case(TaskStatus::Completed, "completed")]
#[case(TaskStatus::Cancelled, "cancelled")]
fn status_round_trips_through_storage_form(#[case] status: TaskStatus, #[case] text: &str) {
    assert_eq!(status.as_str(), text);
    assert_eq!(TaskStatus::try_from(text), Ok(status));
}

#[rstest]
fn status_parsing_normalizes_case_and_whitespace() {
    assert_eq!(
        TaskStatus::try_from("  In_Progress "),
        Ok(TaskStatus::InProgress)
    );
}

#[rstest]
fn status_parsing_rejects_unknown_literal() {
    assert_eq!(
        TaskStatus::try_from("archived"),
        Err(ParseTaskStatusError("archived".to_owned()))
    );
}

#[rstest]
#[case(TaskPriority::Low, "low")]
#[case(TaskPriority::Medium, "medium")]
#[case(TaskPriority::High, "high")]
#[case(TaskPriority::Urgent, "urgent")]
fn priority_round_trips_through_storage_form(#[case] priority: TaskPriority, #[case] text: &str) {
    assert_eq!(priority.as_str(), text);
    assert_eq!(TaskPriority::try_from(text), Ok(priority));
}

#[rstest]
fn priority_parsing_rejects_unknown_literal() {
    assert_eq!(
        TaskPriority::try_from("critical"),
        Err(ParseTaskPriorityError("critical".to_owned()))
    );
}

#[rstest]
fn defaults_are_pending_and_medium() {
    assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    assert_eq!(TaskPriority::default(), TaskPriority::Medium);
}

#[rstest]
fn apply_patch_changes_only_present_fields() {
    let mut task = sample_task();
    let patch = TaskPatch {
        title: Some(Some("Updated Task".to_owned())),
        ..TaskPatch::default()
    };

    task.apply_patch(&patch, timestamp(10));

    assert_eq!(task.title(), "Updated Task");
    assert_eq!(task.description(), Some("Quarterly numbers"));
    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.assigned_to(), Some("omar"));
    assert_eq!(task.updated_at(), Some(timestamp(10)));
}

#[rstest]
fn apply_patch_clears_nullable_fields_on_explicit_null() {
    let mut task = sample_task();
    let patch = TaskPatch {
        description: Some(None),
        assigned_to: Some(None),
        ..TaskPatch::default()
    };

    task.apply_patch(&patch, timestamp(11));

    assert_eq!(task.description(), None);
    assert_eq!(task.assigned_to(), None);
    assert_eq!(task.title(), "Write report");
}

#[rstest]
fn apply_patch_refreshes_updated_at_on_every_mutation() {
    let mut task = sample_task();
    task.apply_patch(&TaskPatch::default(), timestamp(10));
    assert_eq!(task.updated_at(), Some(timestamp(10)));

    task.apply_patch(&TaskPatch::default(), timestamp(12));
    assert_eq!(task.updated_at(), Some(timestamp(12)));
    assert!(task.created_at() <= timestamp(12));
}

#[rstest]
fn empty_patch_reports_empty() {
    assert!(TaskPatch::default().is_empty());
    let patch = TaskPatch {
        status: Some(Some(TaskStatus::Completed)),
        ..TaskPatch::default()
    };
    assert!(!patch.is_empty());
}
