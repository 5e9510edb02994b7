use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::auth::extractor::Operator;
use crate::error::AppError;
use crate::extract::{Json, Path, Query};
use crate::models::ProjectDetail;
use crate::pagination::PageParams;
use crate::service::projects::{self, ProjectChanges};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Deserialize)]
pub struct CreateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// `GET /v1/projects`: a page of projects, or a single one for `?name=`.
pub async fn find(
    operator: Operator,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    if let Some(name) = params.name.as_deref() {
        let project = projects::find_by_name(state.projects.as_ref(), name).await?;
        tracing::info!(operator = %operator, "Project name={name} found");
        return Ok(Json(project).into_response());
    }

    let request = state.page_request(&PageParams {
        page: params.page,
        size: params.size,
    });
    let page = projects::find_all(state.projects.as_ref(), request).await?;
    tracing::info!(
        operator = %operator,
        "Project list found: page {} with {} item(s)",
        page.number,
        page.items.len()
    );

    Ok(Json(page.envelope("projects")).into_response())
}

pub async fn get(
    operator: Operator,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectDetail>, AppError> {
    let project = projects::find_by_id(state.projects.as_ref(), id).await?;
    tracing::info!(operator = %operator, "Project id={id} found");
    Ok(Json(project))
}

pub async fn create(
    operator: Operator,
    State(state): State<SharedState>,
    Json(req): Json<CreateProject>,
) -> Result<(StatusCode, Json<ProjectDetail>), AppError> {
    let project = projects::create(
        state.projects.as_ref(),
        req.name.as_deref(),
        req.description.as_deref(),
    )
    .await?;
    tracing::info!(operator = %operator, "Project id={} created", project.id);
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update(
    operator: Operator,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<ProjectDetail>, AppError> {
    let changes = ProjectChanges {
        name: req.name,
        description: req.description,
    };
    let project = projects::update(state.projects.as_ref(), id, changes).await?;
    tracing::info!(operator = %operator, "Project id={id} updated");
    Ok(Json(project))
}

pub async fn assign_users(
    operator: Operator,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(user_ids): Json<Vec<i64>>,
) -> Result<Json<ProjectDetail>, AppError> {
    let project = projects::assign_users(state.projects.as_ref(), id, &user_ids).await?;
    tracing::info!(
        operator = %operator,
        "Users {:?} assigned to project id={id}",
        project.user_ids()
    );
    Ok(Json(project))
}

pub async fn unassign_users(
    operator: Operator,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(user_ids): Json<Vec<i64>>,
) -> Result<Json<ProjectDetail>, AppError> {
    let project = projects::unassign_users(state.projects.as_ref(), id, &user_ids).await?;
    tracing::info!(
        operator = %operator,
        "Users {user_ids:?} unassigned from project id={id}"
    );
    Ok(Json(project))
}

pub async fn delete(
    operator: Operator,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    projects::delete(state.projects.as_ref(), id).await?;
    tracing::info!(operator = %operator, "Project id={id} deleted");
    Ok(StatusCode::NO_CONTENT)
}
