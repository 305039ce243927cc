//! Email composition for assignment and reminder notifications.

use super::{EmailTemplateError, Origin};
use crate::directory::domain::EmailAddress;
use crate::task::domain::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use minijinja::Environment;
use serde_json::{Map, Value};

/// Outbound email handed to the mail collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html_body: String,
}

/// Read model the workflow resolves before composing an email.
///
/// Snapshots are taken fresh per step; the workflow never carries one
/// across the wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Task identifier.
    pub task_id: TaskId,
    /// Task title.
    pub title: String,
    /// Task description, if any.
    pub description: Option<String>,
    /// Task due date.
    pub due_date: DateTime<Utc>,
    /// Task status at snapshot time.
    pub status: TaskStatus,
    /// Assignee display name.
    pub assignee_name: String,
    /// Assignee email address.
    pub assignee_email: EmailAddress,
    /// Name of the task's project.
    pub project_name: String,
}

const ASSIGNMENT_TEMPLATE: &str = r#"<div style="max-width: 600px;">
  <h2>Hi {{ assignee_name }},</h2>
  <p style="font-size: 16px;">You've been assigned a new task:</p>
  <p style="font-size: 18px; font-weight: bold; color: #007bff; margin: 8px 0;">{{ task_title }}</p>
  <div style="border: 1px solid #ddd; padding: 12px 16px; border-radius: 6px; margin-bottom: 30px;">
    <p style="margin: 6px 0;"><strong>Description:</strong> {{ task_description }}</p>
    <p style="margin: 6px 0;"><strong>Due Date:</strong> {{ due_date }}</p>
  </div>
  <a href="{{ origin }}" style="background-color: #007bff; padding: 12px 24px; border-radius: 5px; color: #fff; font-weight: 600; font-size: 16px; text-decoration: none;">View Task</a>
  <p style="margin-top: 20px; font-size: 14px; color: #6c757d;">Please make sure to review and complete it before the due date.</p>
</div>
"#;

const REMINDER_TEMPLATE: &str = r#"<div style="max-width: 600px;">
  <h2>Hi {{ assignee_name }},</h2>
  <p style="font-size: 16px;">You have a task due in {{ project_name }}:</p>
  <p style="font-size: 18px; font-weight: bold; color: #007bff; margin: 8px 0;">{{ task_title }}</p>
  <div style="border: 1px solid #ddd; padding: 12px 16px; border-radius: 6px; margin-bottom: 30px;">
    <p style="margin: 6px 0;"><strong>Description:</strong> {{ task_description }}</p>
    <p style="margin: 6px 0;"><strong>Due Date:</strong> {{ due_date }}</p>
  </div>
  <a href="{{ origin }}" style="background-color: #007bff; padding: 12px 24px; border-radius: 5px; color: #fff; font-weight: 600; font-size: 16px; text-decoration: none;">View Task</a>
  <p style="margin-top: 20px; font-size: 14px; color: #6c757d;">Please make sure to review and complete it before the due date.</p>
</div>
"#;

/// Composes the immediate assignment email.
///
/// # Errors
///
/// Returns [`EmailTemplateError`] when template rendering fails.
pub fn compose_assignment(
    snapshot: &TaskSnapshot,
    origin: &Origin,
) -> Result<EmailMessage, EmailTemplateError> {
    let subject = format!("New task assignment in {}", snapshot.project_name);
    let html_body = render_template(ASSIGNMENT_TEMPLATE, snapshot, origin)?;
    Ok(EmailMessage {
        to: snapshot.assignee_email.clone(),
        subject,
        html_body,
    })
}

/// Composes the due-date reminder email.
///
/// # Errors
///
/// Returns [`EmailTemplateError`] when template rendering fails.
pub fn compose_reminder(
    snapshot: &TaskSnapshot,
    origin: &Origin,
) -> Result<EmailMessage, EmailTemplateError> {
    let subject = format!("Reminder from {}", snapshot.project_name);
    let html_body = render_template(REMINDER_TEMPLATE, snapshot, origin)?;
    Ok(EmailMessage {
        to: snapshot.assignee_email.clone(),
        subject,
        html_body,
    })
}

fn render_template(
    template: &str,
    snapshot: &TaskSnapshot,
    origin: &Origin,
) -> Result<String, EmailTemplateError> {
    let environment = Environment::new();
    let context = build_template_context(snapshot, origin);
    environment
        .render_str(template, context)
        .map_err(|error| EmailTemplateError {
            reason: error.to_string(),
        })
}

fn build_template_context(snapshot: &TaskSnapshot, origin: &Origin) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert(
        "assignee_name".to_owned(),
        Value::String(snapshot.assignee_name.clone()),
    );
    context.insert(
        "task_title".to_owned(),
        Value::String(snapshot.title.clone()),
    );
    context.insert(
        "task_description".to_owned(),
        Value::String(snapshot.description.clone().unwrap_or_default()),
    );
    context.insert(
        "due_date".to_owned(),
        Value::String(snapshot.due_date.format("%d %B %Y").to_string()),
    );
    context.insert(
        "project_name".to_owned(),
        Value::String(snapshot.project_name.clone()),
    );
    context.insert(
        "origin".to_owned(),
        Value::String(origin.as_str().to_owned()),
    );
    context
}
