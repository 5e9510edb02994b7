pub mod projects;
pub mod users;

use axum::routing::{get, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Users
        .route(
            "/v1/users",
            get(users::find).post(users::create).put(users::update),
        )
        .route("/v1/users/{id}", get(users::get).delete(users::delete))
        // Projects
        .route("/v1/projects", get(projects::find).post(projects::create))
        .route(
            "/v1/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/v1/projects/{id}/users/assign",
            put(projects::assign_users),
        )
        .route(
            "/v1/projects/{id}/users/unassign",
            put(projects::unassign_users),
        )
}
