use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Project without its user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        ProjectDto {
            id: project.id,
            name: project.name,
            description: project.description,
        }
    }
}

/// Project together with its assigned users, in assignment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetail {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub users: Vec<User>,
}

impl ProjectDetail {
    pub fn new(project: Project, users: Vec<User>) -> Self {
        ProjectDetail {
            id: project.id,
            name: project.name,
            description: project.description,
            users,
        }
    }

    pub fn user_ids(&self) -> Vec<i64> {
        self.users.iter().map(|u| u.id).collect()
    }
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}
