use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::store::StoreError;

/// `yyyy-MM-ddTHH:mm:ss.SSS`, local time.
pub const TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f";

#[derive(Debug)]
pub enum AppError {
    UserIdNotFound(i64),
    UserNameNotFound(String),
    UserEmailNotFound(String),
    EmailNotValid,
    EmailAlreadyExists,
    FieldNotValid(String),
    UsersNotCreated,
    NoSearchParamsProvided,
    ProjectNotFound,
    ProjectsNotLoaded,
    ProjectNameNotValid,
    AssignRejected(String),
    UnassignRejected(String),
    MalformedRequest(String),
    Unauthorized,
    Store(StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UserIdNotFound(_)
            | AppError::UserNameNotFound(_)
            | AppError::UserEmailNotFound(_)
            | AppError::UsersNotCreated
            | AppError::ProjectNotFound
            | AppError::ProjectsNotLoaded
            | AppError::AssignRejected(_)
            | AppError::UnassignRejected(_) => StatusCode::NOT_FOUND,
            AppError::EmailNotValid
            | AppError::FieldNotValid(_)
            | AppError::NoSearchParamsProvided
            | AppError::ProjectNameNotValid
            | AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to clients. Server-side details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            AppError::Store(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        let status = self.status();
        ApiError {
            timestamp: chrono::Local::now().format(TIME_PATTERN).to_string(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: self.message(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::UserIdNotFound(id) => write!(f, "user with id={id} not found"),
            AppError::UserNameNotFound(name) => write!(f, "user with name={name} not found"),
            AppError::UserEmailNotFound(_) => write!(f, "user email not found"),
            AppError::EmailNotValid => write!(f, "email format is not valid"),
            AppError::EmailAlreadyExists => write!(f, "given email already exists"),
            AppError::FieldNotValid(field) => write!(f, "field {field} is not valid"),
            AppError::UsersNotCreated => write!(f, "no users created"),
            AppError::NoSearchParamsProvided => write!(f, "provide either email or name"),
            AppError::ProjectNotFound => write!(f, "project not found"),
            AppError::ProjectsNotLoaded => write!(f, "no projects loaded"),
            AppError::ProjectNameNotValid => write!(f, "not valid project name"),
            AppError::AssignRejected(ids) => write!(
                f,
                "users id/s [{ids}] were not found and not added to the project"
            ),
            AppError::UnassignRejected(ids) => write!(
                f,
                "users id/s [{ids}] were not found and not unassign from the project"
            ),
            AppError::MalformedRequest(msg) => write!(f, "{msg}"),
            AppError::Unauthorized => {
                write!(f, "full authentication is required to access this resource")
            }
            AppError::Store(err) => write!(f, "store error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("status {status}. {self}");
        } else {
            tracing::warn!("status {status}. {self}");
        }

        let mut response = (status, axum::Json(self.to_api_error())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"roster\""),
            );
        }
        response
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::EmailAlreadyExists,
            other => AppError::Store(other),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::from(err).into()
    }
}
