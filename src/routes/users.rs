use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::auth::extractor::Operator;
use crate::error::AppError;
use crate::extract::{Json, Path, Query};
use crate::models::{User, UserDto};
use crate::pagination::PageParams;
use crate::service::users::{self, UserQuery};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `GET /v1/users`: a page of users, or a single user for `?name=` / `?email=`.
pub async fn find(
    operator: Operator,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    if let Some(query) = UserQuery::from_params(params.name.as_deref(), params.email.as_deref()) {
        let query = query?;
        let user = users::search(state.users.as_ref(), &query).await?;
        match &query {
            UserQuery::ByName(name) => {
                tracing::info!(operator = %operator, "User name={name} found")
            }
            UserQuery::ByEmail(email) => {
                tracing::info!(operator = %operator, "User email={email} found")
            }
        }
        return Ok(Json(user).into_response());
    }

    let request = state.page_request(&PageParams {
        page: params.page,
        size: params.size,
    });
    let page = users::find_all(state.users.as_ref(), request).await?;
    tracing::info!(
        operator = %operator,
        "User list found: page {} with {} item(s)",
        page.number,
        page.items.len()
    );

    Ok(Json(page.envelope("users")).into_response())
}

pub async fn get(
    operator: Operator,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, AppError> {
    let user = users::find_by_id(state.users.as_ref(), id).await?;
    tracing::info!(operator = %operator, "User id={id} found");
    Ok(Json(user))
}

pub async fn create(
    operator: Operator,
    State(state): State<SharedState>,
    Json(req): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = users::create(
        state.users.as_ref(),
        req.name.as_deref(),
        req.email.as_deref(),
    )
    .await?;
    tracing::info!(operator = %operator, "User id={} created", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    operator: Operator,
    State(state): State<SharedState>,
    Json(req): Json<UpdateUser>,
) -> Result<Json<User>, AppError> {
    let user = users::update(
        state.users.as_ref(),
        req.id,
        req.name.as_deref(),
        req.email.as_deref(),
    )
    .await?;
    tracing::info!(operator = %operator, "User id={} updated", user.id);
    Ok(Json(user))
}

pub async fn delete(
    operator: Operator,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    users::delete(state.users.as_ref(), id).await?;
    tracing::info!(operator = %operator, "User id={id} deleted");
    Ok(StatusCode::NO_CONTENT)
}
