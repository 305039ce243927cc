//! Domain-focused tests for tasks and comments.

use crate::directory::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::domain::{
    Comment, Task, TaskDomainError, TaskDraft, TaskStatus, TaskUpdate,
};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::rstest;

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        project_id: ProjectId::new(),
        title: title.to_owned(),
        description: None,
        due_date: Utc
            .with_ymd_and_hms(2026, 3, 14, 17, 0, 0)
            .single()
            .expect("valid timestamp"),
        status: TaskStatus::Todo,
        assignee: None,
    }
}

#[rstest]
#[case("todo", TaskStatus::Todo)]
#[case("IN_PROGRESS", TaskStatus::InProgress)]
#[case(" done ", TaskStatus::Done)]
fn task_status_round_trips(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
    assert_eq!(TaskStatus::try_from(expected.as_str()), Ok(expected));
}

#[rstest]
fn task_status_rejects_unknown_values() {
    assert!(TaskStatus::try_from("blocked").is_err());
}

#[rstest]
fn task_create_rejects_empty_title() {
    let result = Task::create(draft("   "), &DefaultClock);
    assert_eq!(result, Err(TaskDomainError::EmptyTaskTitle));
}

#[rstest]
fn task_create_trims_title_and_defaults() {
    let task = Task::create(draft("  Ship it  "), &DefaultClock).expect("valid task");
    assert_eq!(task.title(), "Ship it");
    assert_eq!(task.status(), TaskStatus::Todo);
    assert!(!task.is_done());
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn status_transitions_are_free_form() {
    let mut task = Task::create(draft("Ship it"), &DefaultClock).expect("valid task");

    task.set_status(TaskStatus::Done, &DefaultClock);
    assert!(task.is_done());
    // Boards move cards back; nothing stops Done -> Todo.
    task.set_status(TaskStatus::Todo, &DefaultClock);
    assert_eq!(task.status(), TaskStatus::Todo);
}

#[rstest]
fn task_update_replaces_assignee() {
    let mut task = Task::create(draft("Ship it"), &DefaultClock).expect("valid task");
    let alice = UserId::new("user_alice").expect("valid user id");

    task.apply_update(
        TaskUpdate {
            title: "Ship it".to_owned(),
            description: Some("with tests".to_owned()),
            due_date: task.due_date(),
            status: TaskStatus::InProgress,
            assignee: Some(alice.clone()),
        },
        &DefaultClock,
    )
    .expect("valid update");

    assert_eq!(task.assignee(), Some(&alice));
    assert_eq!(task.description(), Some("with tests"));
}

#[rstest]
fn comment_rejects_empty_content() {
    let author = UserId::new("user_alice").expect("valid user id");
    let result = Comment::new(
        Task::create(draft("Ship it"), &DefaultClock)
            .expect("valid task")
            .id(),
        author,
        "   ",
        &DefaultClock,
    );
    assert_eq!(result, Err(TaskDomainError::EmptyCommentContent));
}

#[rstest]
fn comment_trims_content() {
    let author = UserId::new("user_alice").expect("valid user id");
    let task = Task::create(draft("Ship it"), &DefaultClock).expect("valid task");
    let comment =
        Comment::new(task.id(), author.clone(), "  looks good  ", &DefaultClock)
            .expect("valid comment");

    assert_eq!(comment.content(), "looks good");
    assert_eq!(comment.author(), &author);
    assert_eq!(comment.task_id(), task.id());
}
