use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{error::AppError, models::AuthedUser, routes::AppState};

/// Authenticated user for the current request.
///
/// Add as a handler argument to require a signed-in caller: the extractor
/// reads the `Authorization: Bearer <session-token>` header, resolves the
/// session against the store, and rejects the request with 401 before the
/// handler body runs. Session issuance itself lives in the external auth
/// system.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthedUser);

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Expected a bearer session token".to_string())
        })?;

        let token = Uuid::parse_str(token.trim())
            .map_err(|_| AppError::Unauthorized("Malformed session token".to_string()))?;

        let user = state
            .sessions
            .current_user(token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session expired or unknown".to_string()))?;

        Ok(CurrentUser(user))
    }
}
