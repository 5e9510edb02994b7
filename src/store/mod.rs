//! Persistence boundary for users, projects and the link table between them.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewProject, NewUser, Project, User};
use crate::pagination::{Page, PageRequest};
use crate::reconcile::LinkChange;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug)]
pub enum StoreError {
    /// Another user already holds this email.
    DuplicateEmail,
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateEmail => write!(f, "duplicate email"),
            StoreError::Database(err) => write!(f, "database error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail
            }
            _ => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<User>>;
    /// Returns the subset of `ids` that exist, ordered by id.
    async fn find_all_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<User>>;
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    async fn save(&self, user: &User) -> StoreResult<User>;
    /// Detaches the user from every project, then removes it, atomically.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    async fn projects_of(&self, user_id: i64) -> StoreResult<Vec<Project>>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Project>>;
    /// Lowest id wins when several projects share a name.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Project>>;
    async fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Project>>;
    async fn create(&self, project: NewProject) -> StoreResult<Project>;
    async fn save(&self, project: &Project) -> StoreResult<Project>;
    /// Detaches every user from the project, then removes it, atomically.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    /// Assigned users in assignment order.
    async fn users_of(&self, project_id: i64) -> StoreResult<Vec<User>>;
    /// Reads the project's users, plans `change` against them and writes the
    /// result as one atomic step. Returns the new list in assignment order,
    /// or `None` when the project does not exist.
    async fn change_users(
        &self,
        project_id: i64,
        change: LinkChange<'_>,
    ) -> Result<Option<Vec<User>>, AppError>;
}
