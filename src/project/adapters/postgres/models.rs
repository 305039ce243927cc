//! Diesel row models for project persistence.

use super::schema::{project_members, projects};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert model for project records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Owning workspace identifier.
    pub workspace_id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Delivery status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Completion percentage.
    pub progress: i16,
    /// Optional team lead user identifier.
    pub team_lead: Option<String>,
    /// Optional planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Optional planned end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert model for project membership records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectMemberRow {
    /// Project identifier.
    pub project_id: uuid::Uuid,
    /// Member user identifier.
    pub user_id: String,
    /// Timestamp the membership was recorded.
    pub added_at: DateTime<Utc>,
}
