use crate::error::AppError;
use crate::models::{NewUser, ProjectDto, User, UserDto};
use crate::pagination::{Page, PageRequest};
use crate::store::UserStore;
use crate::validation::{validate_email, validate_name};

/// Lookup by `?name=` or `?email=`. Name wins when both are given.
#[derive(Debug, Clone)]
pub enum UserQuery {
    ByName(String),
    ByEmail(String),
}

impl UserQuery {
    /// `None` means no search was requested at all; blank values alone are
    /// rejected with `NoSearchParamsProvided`.
    pub fn from_params(
        name: Option<&str>,
        email: Option<&str>,
    ) -> Option<Result<UserQuery, AppError>> {
        if name.is_none() && email.is_none() {
            return None;
        }
        let name = name.filter(|n| !n.trim().is_empty());
        let email = email.filter(|e| !e.trim().is_empty());
        Some(match (name, email) {
            (Some(name), _) => Ok(UserQuery::ByName(name.to_string())),
            (None, Some(email)) => Ok(UserQuery::ByEmail(email.to_string())),
            (None, None) => Err(AppError::NoSearchParamsProvided),
        })
    }
}

pub async fn find_by_id(users: &dyn UserStore, id: i64) -> Result<UserDto, AppError> {
    let user = users
        .find_by_id(id)
        .await?
        .ok_or(AppError::UserIdNotFound(id))?;
    let projects = users.projects_of(id).await?;

    Ok(UserDto::from_parts(
        user,
        projects.into_iter().map(ProjectDto::from),
    ))
}

pub async fn find_by_name(users: &dyn UserStore, name: &str) -> Result<User, AppError> {
    users
        .find_by_name(name)
        .await?
        .ok_or_else(|| AppError::UserNameNotFound(name.to_string()))
}

pub async fn find_by_email(users: &dyn UserStore, email: &str) -> Result<User, AppError> {
    validate_email(email)?;

    users
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::UserEmailNotFound(email.to_string()))
}

pub async fn search(users: &dyn UserStore, query: &UserQuery) -> Result<User, AppError> {
    match query {
        UserQuery::ByName(name) => find_by_name(users, name).await,
        UserQuery::ByEmail(email) => find_by_email(users, email).await,
    }
}

pub async fn find_all(users: &dyn UserStore, request: PageRequest) -> Result<Page<User>, AppError> {
    let page = users.find_all_paged(request).await?;
    if page.is_empty() {
        return Err(AppError::UsersNotCreated);
    }
    Ok(page)
}

/// Checks run in order: email format, email uniqueness, name.
pub async fn create(
    users: &dyn UserStore,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<User, AppError> {
    let email = email.unwrap_or_default();
    validate_email(email)?;

    if users.find_by_email(email).await?.is_some() {
        return Err(AppError::EmailAlreadyExists);
    }

    let name = name.unwrap_or_default();
    validate_name(name)?;

    let user = users
        .create(NewUser {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await?;
    Ok(user)
}

/// Replaces name and email. Project assignments are left as they are.
pub async fn update(
    users: &dyn UserStore,
    id: i64,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<User, AppError> {
    let mut user = users
        .find_by_id(id)
        .await?
        .ok_or(AppError::UserIdNotFound(id))?;

    let email = email.unwrap_or_default();
    validate_email(email)?;

    let name = name.unwrap_or_default();
    validate_name(name)?;

    if let Some(holder) = users.find_by_email(email).await? {
        if holder.id != id {
            return Err(AppError::EmailAlreadyExists);
        }
    }

    user.name = name.to_string();
    user.email = email.to_string();
    Ok(users.save(&user).await?)
}

pub async fn delete(users: &dyn UserStore, id: i64) -> Result<(), AppError> {
    if users.find_by_id(id).await?.is_none() {
        return Err(AppError::UserIdNotFound(id));
    }
    users.delete_by_id(id).await?;
    Ok(())
}
