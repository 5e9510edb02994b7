use async_trait::async_trait;
use sqlx::PgPool;

use super::{ProjectStore, StoreResult, UserStore};
use crate::db;
use crate::error::AppError;
use crate::models::{NewProject, NewUser, Project, User};
use crate::pagination::{Page, PageRequest};
use crate::reconcile::LinkChange;

/// PostgreSQL-backed store. Deletes and link changes each run in one
/// transaction that first locks the row they hang off.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn bounds(request: PageRequest) -> (i64, i64) {
    let limit = i64::try_from(request.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(db::users::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<User>> {
        Ok(db::users::find_by_name(&self.pool, name).await?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(db::users::find_by_email(&self.pool, email).await?)
    }

    async fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<User>> {
        let (limit, offset) = bounds(request);
        let users = db::users::list_paged(&self.pool, limit, offset).await?;
        let total = db::users::count_all(&self.pool).await?;
        Ok(Page::new(users, request, u64::try_from(total).unwrap_or(0)))
    }

    async fn find_all_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(db::users::find_all_by_ids(&self.pool, ids).await?)
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        Ok(db::users::create(&self.pool, &user.name, &user.email).await?)
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        Ok(db::users::update(&self.pool, user).await?)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        db::users::lock(&mut *tx, id).await?;
        let detached = db::project_users::clear_user(&mut *tx, id).await?;
        db::users::delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::debug!("user {id} detached from {detached} project(s) and deleted");
        Ok(())
    }

    async fn projects_of(&self, user_id: i64) -> StoreResult<Vec<Project>> {
        Ok(db::project_users::projects_of(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Project>> {
        Ok(db::projects::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Project>> {
        Ok(db::projects::find_by_name(&self.pool, name).await?)
    }

    async fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Project>> {
        let (limit, offset) = bounds(request);
        let projects = db::projects::list_paged(&self.pool, limit, offset).await?;
        let total = db::projects::count_all(&self.pool).await?;
        Ok(Page::new(projects, request, u64::try_from(total).unwrap_or(0)))
    }

    async fn create(&self, project: NewProject) -> StoreResult<Project> {
        Ok(db::projects::create(&self.pool, &project.name, project.description.as_deref()).await?)
    }

    async fn save(&self, project: &Project) -> StoreResult<Project> {
        Ok(db::projects::update(&self.pool, project).await?)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        db::projects::lock(&mut *tx, id).await?;
        let detached = db::project_users::clear_project(&mut *tx, id).await?;
        db::projects::delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::debug!("project {id} detached from {detached} user(s) and deleted");
        Ok(())
    }

    async fn users_of(&self, project_id: i64) -> StoreResult<Vec<User>> {
        Ok(db::project_users::users_of(&self.pool, project_id).await?)
    }

    async fn change_users(
        &self,
        project_id: i64,
        change: LinkChange<'_>,
    ) -> Result<Option<Vec<User>>, AppError> {
        let mut tx = self.pool.begin().await?;
        if db::projects::lock(&mut *tx, project_id).await?.is_none() {
            return Ok(None);
        }

        let resolved = db::users::lock_existing(&mut *tx, change.requested()).await?;
        let current = db::project_users::user_ids_of(&mut *tx, project_id).await?;
        let planned = change.plan(&current, &resolved)?;

        db::project_users::clear_project(&mut *tx, project_id).await?;
        for (position, user_id) in planned.iter().enumerate() {
            let position = i32::try_from(position).unwrap_or(i32::MAX);
            db::project_users::insert(&mut *tx, project_id, *user_id, position).await?;
        }
        let users = db::project_users::users_of(&mut *tx, project_id).await?;
        tx.commit().await?;

        tracing::debug!("project {project_id} now has {} user(s)", users.len());
        Ok(Some(users))
    }
}
