pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod pagination;
pub mod reconcile;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod validation;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::credentials::{CredentialCheck, StaticCredentials};
use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::store::{ProjectStore, UserStore};

/// Fails only when the configured credentials are unusable.
pub fn build_app(
    users: Arc<dyn UserStore>,
    projects: Arc<dyn ProjectStore>,
    config: Config,
) -> Result<Router, String> {
    let credentials: Option<Arc<dyn CredentialCheck>> = match config.auth.as_ref() {
        Some(auth) => {
            tracing::info!("Basic auth enabled for user {}", auth.username);
            Some(Arc::new(StaticCredentials::new(auth)?))
        }
        None => {
            tracing::warn!("No credentials configured, API is open to every caller");
            None
        }
    };

    let max_body_size = config.max_body_size;
    let state: SharedState = Arc::new(AppState {
        users,
        projects,
        config,
        credentials,
    });

    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state);

    Ok(app)
}

async fn health() -> &'static str {
    "ok"
}
