//! Diesel row models for durable workflow state.

use super::schema::{notification_steps, notification_timers};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query and insert model for journal records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notification_steps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StepRow {
    /// Workflow instance identifier.
    pub instance_id: uuid::Uuid,
    /// Step name.
    pub step: String,
    /// Recorded step output.
    pub output: Value,
    /// Timestamp the step was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Query and insert model for timer registrations.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notification_timers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimerRow {
    /// Workflow instance identifier.
    pub instance_id: uuid::Uuid,
    /// Step name.
    pub step: String,
    /// Wall-clock time the workflow should resume.
    pub fire_at: DateTime<Utc>,
    /// Timestamp the timer was registered.
    pub registered_at: DateTime<Utc>,
}
