use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;

use crate::error::AppError;
use crate::state::SharedState;

/// Caller that passed the configured credential check.
///
/// When no credentials are configured every request is let through and
/// `username` is `None`.
#[derive(Debug, Clone)]
pub struct Operator {
    pub username: Option<String>,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.username.as_deref().unwrap_or("anonymous"))
    }
}

impl FromRequestParts<SharedState> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let Some(credentials) = state.credentials.as_ref() else {
            return Ok(Operator { username: None });
        };

        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        if credentials.verify(basic.username(), basic.password()) {
            Ok(Operator {
                username: Some(basic.username().to_string()),
            })
        } else {
            tracing::warn!("Rejected credentials for user {}", basic.username());
            Err(AppError::Unauthorized)
        }
    }
}
