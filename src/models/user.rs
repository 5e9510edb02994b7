use serde::{Deserialize, Serialize};

use super::project::ProjectDto;

/// Stored user. Project links live in the join table, never on the entity.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// User as returned by the single-user lookup, with its assigned projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub projects: Vec<ProjectDto>,
}

impl UserDto {
    /// Projects come back sorted by id with duplicates removed.
    pub fn from_parts(user: User, projects: impl IntoIterator<Item = ProjectDto>) -> Self {
        let mut projects: Vec<ProjectDto> = projects.into_iter().collect();
        projects.sort_by_key(|p| p.id);
        projects.dedup_by_key(|p| p.id);

        UserDto {
            id: user.id,
            name: user.name,
            email: user.email,
            projects,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}
