use crate::error::AppError;
use crate::models::{NewProject, Project, ProjectDetail, ProjectDto};
use crate::pagination::{Page, PageRequest};
use crate::reconcile::LinkChange;
use crate::store::ProjectStore;
use crate::validation::validate_project_name;

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

async fn load(projects: &dyn ProjectStore, id: i64) -> Result<Project, AppError> {
    projects
        .find_by_id(id)
        .await?
        .ok_or(AppError::ProjectNotFound)
}

async fn detail(projects: &dyn ProjectStore, project: Project) -> Result<ProjectDetail, AppError> {
    let users = projects.users_of(project.id).await?;
    Ok(ProjectDetail::new(project, users))
}

pub async fn find_by_id(projects: &dyn ProjectStore, id: i64) -> Result<ProjectDetail, AppError> {
    let project = load(projects, id).await?;
    detail(projects, project).await
}

pub async fn find_by_name(projects: &dyn ProjectStore, name: &str) -> Result<ProjectDto, AppError> {
    let project = projects
        .find_by_name(name)
        .await?
        .ok_or(AppError::ProjectNotFound)?;
    Ok(project.into())
}

pub async fn find_all(
    projects: &dyn ProjectStore,
    request: PageRequest,
) -> Result<Page<ProjectDto>, AppError> {
    let page = projects.find_all_paged(request).await?;
    if page.is_empty() {
        return Err(AppError::ProjectsNotLoaded);
    }
    Ok(page.map(ProjectDto::from))
}

pub async fn create(
    projects: &dyn ProjectStore,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<ProjectDetail, AppError> {
    validate_project_name(name)?;

    let project = projects
        .create(NewProject {
            name: name.unwrap_or_default().to_string(),
            description: description.map(str::to_string),
        })
        .await?;
    Ok(ProjectDetail::new(project, Vec::new()))
}

pub async fn update(
    projects: &dyn ProjectStore,
    id: i64,
    changes: ProjectChanges,
) -> Result<ProjectDetail, AppError> {
    let mut project = load(projects, id).await?;

    if let Some(name) = changes.name {
        validate_project_name(Some(&name))?;
        project.name = name;
    }
    if let Some(description) = changes.description {
        project.description = Some(description);
    }

    let project = projects.save(&project).await?;
    detail(projects, project).await
}

async fn change_users(
    projects: &dyn ProjectStore,
    id: i64,
    change: LinkChange<'_>,
) -> Result<ProjectDetail, AppError> {
    let project = load(projects, id).await?;
    let users = projects
        .change_users(project.id, change)
        .await?
        .ok_or(AppError::ProjectNotFound)?;
    Ok(ProjectDetail::new(project, users))
}

/// Replaces the project's users with `user_ids`. Every id must exist.
pub async fn assign_users(
    projects: &dyn ProjectStore,
    id: i64,
    user_ids: &[i64],
) -> Result<ProjectDetail, AppError> {
    change_users(projects, id, LinkChange::Assign(user_ids)).await
}

/// Removes `user_ids` from the project. Every id must currently be assigned.
pub async fn unassign_users(
    projects: &dyn ProjectStore,
    id: i64,
    user_ids: &[i64],
) -> Result<ProjectDetail, AppError> {
    change_users(projects, id, LinkChange::Unassign(user_ids)).await
}

pub async fn delete(projects: &dyn ProjectStore, id: i64) -> Result<(), AppError> {
    load(projects, id).await?;
    projects.delete_by_id(id).await?;
    Ok(())
}
