//! Diesel row models for directory persistence.

use super::schema::{users, workspace_members, workspaces};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert model for user profile records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Provider-issued user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional avatar image URL.
    pub image_url: Option<String>,
}

/// Query and insert model for workspace records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = workspaces)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkspaceRow {
    /// Provider-issued workspace identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Owning user identifier.
    pub owner_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert model for membership records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = workspace_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkspaceMemberRow {
    /// Workspace identifier.
    pub workspace_id: String,
    /// Member user identifier.
    pub user_id: String,
    /// Member role.
    pub role: String,
    /// Optional invitation message.
    pub message: Option<String>,
    /// Timestamp the membership was recorded.
    pub added_at: DateTime<Utc>,
}
