use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::{ListStore, RecommendationStore, SessionStore};
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::services::{browse::BrowseService, recommendations::RecommendationService};

pub mod anime;
pub mod list;
pub mod recommendations;

/// Shared application state handed to every handler
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub list_store: Arc<dyn ListStore>,
    pub rec_store: Arc<dyn RecommendationStore>,
    pub browse: BrowseService,
    pub recommendations: RecommendationService,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            // Outermost first: CORS, then request ids, then traced spans
            // that can already see the id
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/anime/search", get(anime::search))
        .route("/anime/top", get(anime::top))
        .route("/anime/genres", get(anime::genres))
        .route("/anime", get(anime::by_genre))
        .route("/anime/:mal_id", get(anime::detail))
        .route("/list", get(list::index).post(list::add))
        .route("/list/:mal_id", patch(list::update).delete(list::remove))
        .route("/recommendations", get(recommendations::index))
        .route("/recommendations/generate", post(recommendations::generate))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
