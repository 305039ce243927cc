//! `PostgreSQL`-backed durable runtime.
//!
//! Journal rows make steps idempotent across re-invocations; timer rows
//! form the job queue an external driver polls to re-invoke suspended
//! instances at their due timestamps.

use super::{
    models::{StepRow, TimerRow},
    schema::{notification_steps, notification_timers},
};
use crate::notify::{
    domain::WorkflowInstanceId,
    ports::{DurableRuntime, RuntimeError, SleepStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by the notification adapter.
pub type NotifyPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed step journal and timer store.
#[derive(Clone)]
pub struct PostgresDurableRuntime<C>
where
    C: Clock + Send + Sync,
{
    pool: NotifyPgPool,
    clock: Arc<C>,
}

impl<C> PostgresDurableRuntime<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new runtime from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotifyPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> Result<T, RuntimeError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, RuntimeError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RuntimeError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RuntimeError::persistence)?
    }

    /// Returns timer registrations whose deadline has passed.
    ///
    /// The external driver polls this to decide which suspended instances
    /// to re-invoke.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] when the query fails.
    pub async fn due_timers(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(WorkflowInstanceId, DateTime<Utc>)>, RuntimeError> {
        self.run_blocking(move |connection| {
            let rows = notification_timers::table
                .filter(notification_timers::fire_at.le(now))
                .order(notification_timers::fire_at.asc())
                .select(TimerRow::as_select())
                .load::<TimerRow>(connection)
                .map_err(RuntimeError::persistence)?;
            Ok(rows
                .into_iter()
                .map(|row| (WorkflowInstanceId::from_uuid(row.instance_id), row.fire_at))
                .collect())
        })
        .await
    }
}

#[async_trait]
impl<C> DurableRuntime for PostgresDurableRuntime<C>
where
    C: Clock + Send + Sync,
{
    async fn recorded_step(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
    ) -> Result<Option<Value>, RuntimeError> {
        let step_name = step.to_owned();
        self.run_blocking(move |connection| {
            let row = notification_steps::table
                .filter(notification_steps::instance_id.eq(instance.into_inner()))
                .filter(notification_steps::step.eq(step_name.as_str()))
                .select(StepRow::as_select())
                .first::<StepRow>(connection)
                .optional()
                .map_err(RuntimeError::persistence)?;
            Ok(row.map(|record| record.output))
        })
        .await
    }

    async fn record_step(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
        output: Value,
    ) -> Result<(), RuntimeError> {
        let row = StepRow {
            instance_id: instance.into_inner(),
            step: step.to_owned(),
            output,
            recorded_at: self.clock.utc(),
        };
        self.run_blocking(move |connection| {
            // First write wins under at-least-once re-invocation.
            diesel::insert_into(notification_steps::table)
                .values(&row)
                .on_conflict((notification_steps::instance_id, notification_steps::step))
                .do_nothing()
                .execute(connection)
                .map_err(RuntimeError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn sleep_until(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
        deadline: DateTime<Utc>,
    ) -> Result<SleepStatus, RuntimeError> {
        let row = TimerRow {
            instance_id: instance.into_inner(),
            step: step.to_owned(),
            fire_at: deadline,
            registered_at: self.clock.utc(),
        };
        let now = self.clock.utc();
        self.run_blocking(move |connection| {
            diesel::insert_into(notification_timers::table)
                .values(&row)
                .on_conflict((
                    notification_timers::instance_id,
                    notification_timers::step,
                ))
                .do_nothing()
                .execute(connection)
                .map_err(RuntimeError::persistence)?;
            Ok(())
        })
        .await?;

        if now >= deadline {
            Ok(SleepStatus::Elapsed)
        } else {
            Ok(SleepStatus::Pending)
        }
    }
}
