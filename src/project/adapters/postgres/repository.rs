//! `PostgreSQL` repository implementation for project persistence.

use super::{
    models::{ProjectMemberRow, ProjectRow},
    schema::{project_members, projects},
};
use crate::directory::domain::{UserId, WorkspaceId};
use crate::project::{
    domain::{
        PersistedProjectData, Progress, Project, ProjectId, ProjectMember, ProjectPriority,
        ProjectStatus,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by project adapters.
pub type ProjectPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ProjectPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = project_to_row(project);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = project_to_row(project);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                projects::table.filter(projects::id.eq(project_id.into_inner())),
            )
            .set((
                projects::name.eq(row.name),
                projects::description.eq(row.description),
                projects::status.eq(row.status),
                projects::priority.eq(row.priority),
                projects::progress.eq(row.progress),
                projects::team_lead.eq(row.team_lead),
                projects::start_date.eq(row.start_date),
                projects::end_date.eq(row.end_date),
                projects::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(ProjectRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_for_workspace(
        &self,
        workspace: &WorkspaceId,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let workspace_id = workspace.clone();
        self.run_blocking(move |connection| {
            let rows = projects::table
                .filter(projects::workspace_id.eq(workspace_id.as_str()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()> {
        let member_user = member.user_id().clone();
        let member_project = member.project_id();
        let row = member_to_row(member);
        self.run_blocking(move |connection| {
            diesel::insert_into(project_members::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateMember {
                            user: member_user.clone(),
                            project: member_project,
                        }
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_members(
        &self,
        project: ProjectId,
    ) -> ProjectRepositoryResult<Vec<ProjectMember>> {
        self.run_blocking(move |connection| {
            let rows = project_members::table
                .filter(project_members::project_id.eq(project.into_inner()))
                .select(ProjectMemberRow::as_select())
                .load::<ProjectMemberRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_member).collect()
        })
        .await
    }

    async fn is_member(
        &self,
        project: ProjectId,
        user: &UserId,
    ) -> ProjectRepositoryResult<bool> {
        let user_id = user.clone();
        self.run_blocking(move |connection| {
            let found = project_members::table
                .filter(project_members::project_id.eq(project.into_inner()))
                .filter(project_members::user_id.eq(user_id.as_str()))
                .select(ProjectMemberRow::as_select())
                .first::<ProjectMemberRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(found.is_some())
        })
        .await
    }
}

fn project_to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: project.id().into_inner(),
        workspace_id: project.workspace_id().as_str().to_owned(),
        name: project.name().to_owned(),
        description: project.description().map(ToOwned::to_owned),
        status: project.status().as_str().to_owned(),
        priority: project.priority().as_str().to_owned(),
        progress: i16::from(project.progress().value()),
        team_lead: project.team_lead().map(|lead| lead.as_str().to_owned()),
        start_date: project.start_date(),
        end_date: project.end_date(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let workspace_id =
        WorkspaceId::new(row.workspace_id).map_err(ProjectRepositoryError::persistence)?;
    let status = ProjectStatus::try_from(row.status.as_str())
        .map_err(ProjectRepositoryError::persistence)?;
    let priority = ProjectPriority::try_from(row.priority.as_str())
        .map_err(ProjectRepositoryError::persistence)?;
    let progress_raw =
        u8::try_from(row.progress).map_err(ProjectRepositoryError::persistence)?;
    let progress = Progress::new(progress_raw).map_err(ProjectRepositoryError::persistence)?;
    let team_lead = row
        .team_lead
        .map(UserId::new)
        .transpose()
        .map_err(ProjectRepositoryError::persistence)?;

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        workspace_id,
        name: row.name,
        description: row.description,
        status,
        priority,
        progress,
        team_lead,
        start_date: row.start_date,
        end_date: row.end_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn member_to_row(member: &ProjectMember) -> ProjectMemberRow {
    ProjectMemberRow {
        project_id: member.project_id().into_inner(),
        user_id: member.user_id().as_str().to_owned(),
        added_at: member.added_at(),
    }
}

fn row_to_member(row: ProjectMemberRow) -> ProjectRepositoryResult<ProjectMember> {
    let user_id = UserId::new(row.user_id).map_err(ProjectRepositoryError::persistence)?;
    Ok(ProjectMember::from_persisted(
        ProjectId::from_uuid(row.project_id),
        user_id,
        row.added_at,
    ))
}
