use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::{
    auth::CurrentUser,
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    routes::AppState,
};

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub count: usize,
}

/// Handler returning the caller's stored recommendation set
pub async fn index(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<Recommendation>>> {
    let recommendations = state.rec_store.list_for_user(user.id).await?;
    Ok(Json(recommendations))
}

/// Handler for the generation endpoint.
///
/// Any pipeline failure past authentication is collapsed into one generic
/// error so catalog or storage internals never leak to the client; the
/// cause is logged with the request id.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<GenerateResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %user.id,
        "Generating recommendations"
    );

    let count = state
        .recommendations
        .generate(user.id)
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                user_id = %user.id,
                error = %e,
                "Recommendation generation failed"
            );
            AppError::Internal("Failed to generate recommendations".to_string())
        })?;

    Ok(Json(GenerateResponse { count }))
}
