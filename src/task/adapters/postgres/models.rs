//! Diesel row models for task persistence.

use super::schema::{comments, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert model for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Short title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Completion status.
    pub status: String,
    /// Optional assignee user identifier.
    pub assignee_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert model for comment records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Author user identifier.
    pub author_id: String,
    /// Comment content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
