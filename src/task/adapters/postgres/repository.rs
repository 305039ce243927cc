//! `PostgreSQL` repository implementations for task and comment storage.

use super::{
    models::{CommentRow, TaskRow},
    schema::{comments, tasks},
};
use crate::directory::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Comment, CommentId, PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{CommentRepository, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

async fn run_blocking<F, T>(pool: &TaskPgPool, f: F) -> TaskRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(TaskRepositoryError::persistence)?
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task);
        run_blocking(&self.pool, move |connection| {
            let updated =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set((
                        tasks::title.eq(row.title),
                        tasks::description.eq(row.description),
                        tasks::due_date.eq(row.due_date),
                        tasks::status.eq(row.status),
                        tasks::assignee_id.eq(row.assignee_id),
                        tasks::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted = connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(comments::table.filter(comments::task_id.eq(id.into_inner())))
                        .execute(tx)?;
                    diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                        .execute(tx)
                })
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_project(&self, project: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: TaskPgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let comment_id = comment.id();
        let row = comment_to_row(comment);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(&self, task: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        run_blocking(&self.pool, move |connection| {
            let rows = comments::table
                .filter(comments::task_id.eq(task.into_inner()))
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }
}

fn task_to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        due_date: task.due_date(),
        status: task.status().as_str().to_owned(),
        assignee_id: task.assignee().map(|user| user.as_str().to_owned()),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let assignee = row
        .assignee_id
        .map(UserId::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        title: row.title,
        description: row.description,
        due_date: row.due_date,
        status,
        assignee,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn comment_to_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        author_id: comment.author().as_str().to_owned(),
        content: comment.content().to_owned(),
        created_at: comment.created_at(),
    }
}

fn row_to_comment(row: CommentRow) -> TaskRepositoryResult<Comment> {
    let author = UserId::new(row.author_id).map_err(TaskRepositoryError::persistence)?;
    Ok(Comment::from_persisted(
        CommentId::from_uuid(row.id),
        TaskId::from_uuid(row.task_id),
        author,
        row.content,
        row.created_at,
    ))
}
