//! `PostgreSQL` repositories for directory persistence.

use super::{
    models::{UserRow, WorkspaceMemberRow, WorkspaceRow},
    schema::{users, workspace_members, workspaces},
};
use crate::directory::{
    domain::{
        EmailAddress, MemberRole, PersistedWorkspaceData, UserId, UserProfile, Workspace,
        WorkspaceId, WorkspaceMember,
    },
    ports::{
        DirectoryRepositoryError, DirectoryRepositoryResult, UserRepository, WorkspaceRepository,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by directory adapters.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

async fn run_blocking<F, T>(pool: &DirectoryPgPool, f: F) -> DirectoryRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> DirectoryRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(DirectoryRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(DirectoryRepositoryError::persistence)?
}

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: DirectoryPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn upsert(&self, profile: &UserProfile) -> DirectoryRepositoryResult<()> {
        let row = user_to_row(profile);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .on_conflict(users::id)
                .do_update()
                .set((
                    users::name.eq(row.name.clone()),
                    users::email.eq(row.email.clone()),
                    users::image_url.eq(row.image_url.clone()),
                ))
                .execute(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: &UserId) -> DirectoryRepositoryResult<()> {
        let user_id = id.clone();
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(users::table.filter(users::id.eq(user_id.as_str())))
                .execute(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(DirectoryRepositoryError::UserNotFound(user_id.clone()));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> DirectoryRepositoryResult<Option<UserProfile>> {
        let user_id = id.clone();
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::id.eq(user_id.as_str()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> DirectoryRepositoryResult<Option<UserProfile>> {
        let lookup_email = email.clone();
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup_email.as_str()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

/// `PostgreSQL`-backed workspace repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkspaceRepository {
    pool: DirectoryPgPool,
}

impl PostgresWorkspaceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceRepository for PostgresWorkspaceRepository {
    async fn store(&self, workspace: &Workspace) -> DirectoryRepositoryResult<()> {
        let workspace_id = workspace.id().clone();
        let row = workspace_to_row(workspace);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(workspaces::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryRepositoryError::DuplicateWorkspace(workspace_id.clone())
                    }
                    _ => DirectoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, workspace: &Workspace) -> DirectoryRepositoryResult<()> {
        let workspace_id = workspace.id().clone();
        let row = workspace_to_row(workspace);
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(
                workspaces::table.filter(workspaces::id.eq(workspace_id.as_str())),
            )
            .set((
                workspaces::name.eq(row.name),
                workspaces::slug.eq(row.slug),
                workspaces::image_url.eq(row.image_url),
                workspaces::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(DirectoryRepositoryError::persistence)?;
            if updated == 0 {
                return Err(DirectoryRepositoryError::WorkspaceNotFound(
                    workspace_id.clone(),
                ));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: &WorkspaceId) -> DirectoryRepositoryResult<()> {
        let workspace_id = id.clone();
        run_blocking(&self.pool, move |connection| {
            let deleted = connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(
                        workspace_members::table
                            .filter(workspace_members::workspace_id.eq(workspace_id.as_str())),
                    )
                    .execute(tx)?;
                    diesel::delete(
                        workspaces::table.filter(workspaces::id.eq(workspace_id.as_str())),
                    )
                    .execute(tx)
                })
                .map_err(DirectoryRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(DirectoryRepositoryError::WorkspaceNotFound(
                    workspace_id.clone(),
                ));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: &WorkspaceId,
    ) -> DirectoryRepositoryResult<Option<Workspace>> {
        let workspace_id = id.clone();
        run_blocking(&self.pool, move |connection| {
            let row = workspaces::table
                .filter(workspaces::id.eq(workspace_id.as_str()))
                .select(WorkspaceRow::as_select())
                .first::<WorkspaceRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_workspace).transpose()
        })
        .await
    }

    async fn list_for_user(&self, user: &UserId) -> DirectoryRepositoryResult<Vec<Workspace>> {
        let user_id = user.clone();
        run_blocking(&self.pool, move |connection| {
            let rows = workspace_members::table
                .filter(workspace_members::user_id.eq(user_id.as_str()))
                .inner_join(workspaces::table)
                .select(WorkspaceRow::as_select())
                .load::<WorkspaceRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_workspace).collect()
        })
        .await
    }

    async fn add_member(&self, member: &WorkspaceMember) -> DirectoryRepositoryResult<()> {
        let member_user = member.user_id().clone();
        let member_workspace = member.workspace_id().clone();
        let row = member_to_row(member);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(workspace_members::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryRepositoryError::DuplicateMember {
                            user: member_user.clone(),
                            workspace: member_workspace.clone(),
                        }
                    }
                    _ => DirectoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_member(
        &self,
        workspace: &WorkspaceId,
        user: &UserId,
    ) -> DirectoryRepositoryResult<Option<WorkspaceMember>> {
        let workspace_id = workspace.clone();
        let user_id = user.clone();
        run_blocking(&self.pool, move |connection| {
            let row = workspace_members::table
                .filter(workspace_members::workspace_id.eq(workspace_id.as_str()))
                .filter(workspace_members::user_id.eq(user_id.as_str()))
                .select(WorkspaceMemberRow::as_select())
                .first::<WorkspaceMemberRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_member).transpose()
        })
        .await
    }

    async fn list_members(
        &self,
        workspace: &WorkspaceId,
    ) -> DirectoryRepositoryResult<Vec<WorkspaceMember>> {
        let workspace_id = workspace.clone();
        run_blocking(&self.pool, move |connection| {
            let rows = workspace_members::table
                .filter(workspace_members::workspace_id.eq(workspace_id.as_str()))
                .select(WorkspaceMemberRow::as_select())
                .load::<WorkspaceMemberRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_member).collect()
        })
        .await
    }
}

fn user_to_row(profile: &UserProfile) -> UserRow {
    UserRow {
        id: profile.id().as_str().to_owned(),
        name: profile.name().to_owned(),
        email: profile.email().as_str().to_owned(),
        image_url: profile.image_url().map(ToOwned::to_owned),
    }
}

fn row_to_user(row: UserRow) -> DirectoryRepositoryResult<UserProfile> {
    let id = UserId::new(row.id).map_err(DirectoryRepositoryError::persistence)?;
    let email = EmailAddress::new(row.email).map_err(DirectoryRepositoryError::persistence)?;
    let mut profile =
        UserProfile::new(id, row.name, email).map_err(DirectoryRepositoryError::persistence)?;
    if let Some(image_url) = row.image_url {
        profile = profile.with_image_url(image_url);
    }
    Ok(profile)
}

fn workspace_to_row(workspace: &Workspace) -> WorkspaceRow {
    WorkspaceRow {
        id: workspace.id().as_str().to_owned(),
        name: workspace.name().to_owned(),
        slug: workspace.slug().to_owned(),
        image_url: workspace.image_url().map(ToOwned::to_owned),
        owner_id: workspace.owner().as_str().to_owned(),
        created_at: workspace.created_at(),
        updated_at: workspace.updated_at(),
    }
}

fn row_to_workspace(row: WorkspaceRow) -> DirectoryRepositoryResult<Workspace> {
    let id = WorkspaceId::new(row.id).map_err(DirectoryRepositoryError::persistence)?;
    let owner = UserId::new(row.owner_id).map_err(DirectoryRepositoryError::persistence)?;
    Ok(Workspace::from_persisted(PersistedWorkspaceData {
        id,
        name: row.name,
        slug: row.slug,
        image_url: row.image_url,
        owner,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn member_to_row(member: &WorkspaceMember) -> WorkspaceMemberRow {
    WorkspaceMemberRow {
        workspace_id: member.workspace_id().as_str().to_owned(),
        user_id: member.user_id().as_str().to_owned(),
        role: member.role().as_str().to_owned(),
        message: member.message().map(ToOwned::to_owned),
        added_at: member.added_at(),
    }
}

fn row_to_member(row: WorkspaceMemberRow) -> DirectoryRepositoryResult<WorkspaceMember> {
    let workspace_id =
        WorkspaceId::new(row.workspace_id).map_err(DirectoryRepositoryError::persistence)?;
    let user_id = UserId::new(row.user_id).map_err(DirectoryRepositoryError::persistence)?;
    let role = MemberRole::try_from(row.role.as_str())
        .map_err(DirectoryRepositoryError::persistence)?;
    Ok(WorkspaceMember::from_persisted(
        workspace_id,
        user_id,
        role,
        row.message,
        row.added_at,
    ))
}
