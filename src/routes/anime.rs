use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::CurrentUser,
    error::AppResult,
    models::{CatalogAnime, CatalogPage, CATALOG_GENRES},
    routes::AppState,
};

fn default_page() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    #[serde(default = "default_page")]
    page: i32,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    page: i32,
}

#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    genre: i64,
    #[serde(default = "default_page")]
    page: i32,
}

/// Handler for catalog title search
pub async fn search(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<CatalogPage>> {
    let results = state.browse.search(&params.q, params.page).await?;
    Ok(Json(results))
}

/// Handler for the community popularity ranking
pub async fn top(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<CatalogPage>> {
    let results = state.browse.top(params.page).await?;
    Ok(Json(results))
}

/// Handler for browsing titles by catalog genre id
pub async fn by_genre(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<GenreQuery>,
) -> AppResult<Json<CatalogPage>> {
    let results = state.browse.by_genre(params.genre, params.page).await?;
    Ok(Json(results))
}

/// Handler for a single title lookup
pub async fn detail(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(mal_id): Path<i64>,
) -> AppResult<Json<CatalogAnime>> {
    let anime = state.browse.detail(mal_id).await?;
    Ok(Json(anime))
}

/// Handler for the genre filter table offered by the browse UI
pub async fn genres(_user: CurrentUser) -> Json<Value> {
    let genres: Vec<Value> = CATALOG_GENRES
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect();
    Json(json!({ "data": genres }))
}
