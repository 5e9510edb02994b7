use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProjectStore, StoreError, StoreResult, UserStore};
use crate::error::AppError;
use crate::models::{NewProject, NewUser, Project, User};
use crate::pagination::{Page, PageRequest};
use crate::reconcile::LinkChange;

/// Process-local store. Each mutation holds the write lock for its whole
/// duration, which gives the same all-or-nothing behaviour as a transaction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    projects: BTreeMap<i64, Project>,
    /// `(project_id, user_id)` in insertion order.
    links: Vec<(i64, i64)>,
    next_user_id: i64,
    next_project_id: i64,
}

impl Tables {
    fn users_of(&self, project_id: i64) -> Vec<User> {
        self.links
            .iter()
            .filter(|&&(pid, _)| pid == project_id)
            .filter_map(|(_, uid)| self.users.get(uid).cloned())
            .collect()
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_of<T: Clone>(rows: &BTreeMap<i64, T>, request: PageRequest) -> Page<T> {
    let items = rows
        .values()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(request.size as usize)
        .cloned()
        .collect();
    Page::new(items, request, rows.len() as u64)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.values().find(|u| u.name == name).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<User>> {
        Ok(page_of(&self.inner.read().await.users, request))
    }

    async fn find_all_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<User>> {
        let tables = self.inner.read().await;
        let wanted: HashSet<i64> = ids.iter().copied().collect();
        Ok(tables
            .users
            .values()
            .filter(|u| wanted.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.inner.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(StoreError::DuplicateEmail);
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            name: user.name,
            email: user.email,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        let mut tables = self.inner.write().await;
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(StoreError::DuplicateEmail);
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        tables.links.retain(|&(_, user_id)| user_id != id);
        tables.users.remove(&id);
        Ok(())
    }

    async fn projects_of(&self, user_id: i64) -> StoreResult<Vec<Project>> {
        let tables = self.inner.read().await;
        let project_ids: HashSet<i64> = tables
            .links
            .iter()
            .filter(|&&(_, uid)| uid == user_id)
            .map(|&(pid, _)| pid)
            .collect();
        Ok(tables
            .projects
            .values()
            .filter(|p| project_ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Project>> {
        Ok(self.inner.read().await.projects.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Project>> {
        let tables = self.inner.read().await;
        Ok(tables.projects.values().find(|p| p.name == name).cloned())
    }

    async fn find_all_paged(&self, request: PageRequest) -> StoreResult<Page<Project>> {
        Ok(page_of(&self.inner.read().await.projects, request))
    }

    async fn create(&self, project: NewProject) -> StoreResult<Project> {
        let mut tables = self.inner.write().await;
        tables.next_project_id += 1;
        let project = Project {
            id: tables.next_project_id,
            name: project.name,
            description: project.description,
        };
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn save(&self, project: &Project) -> StoreResult<Project> {
        let mut tables = self.inner.write().await;
        tables.projects.insert(project.id, project.clone());
        Ok(project.clone())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        tables.links.retain(|&(project_id, _)| project_id != id);
        tables.projects.remove(&id);
        Ok(())
    }

    async fn users_of(&self, project_id: i64) -> StoreResult<Vec<User>> {
        Ok(self.inner.read().await.users_of(project_id))
    }

    async fn change_users(
        &self,
        project_id: i64,
        change: LinkChange<'_>,
    ) -> Result<Option<Vec<User>>, AppError> {
        let mut tables = self.inner.write().await;
        if !tables.projects.contains_key(&project_id) {
            return Ok(None);
        }

        let resolved: Vec<i64> = change
            .requested()
            .iter()
            .copied()
            .filter(|id| tables.users.contains_key(id))
            .collect();
        let current: Vec<i64> = tables
            .links
            .iter()
            .filter(|&&(pid, _)| pid == project_id)
            .map(|&(_, uid)| uid)
            .collect();
        let planned = change.plan(&current, &resolved)?;

        tables.links.retain(|&(pid, _)| pid != project_id);
        tables
            .links
            .extend(planned.into_iter().map(|user_id| (project_id, user_id)));
        Ok(Some(tables.users_of(project_id)))
    }
}
