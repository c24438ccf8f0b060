use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    auth::CurrentUser,
    db::{ListEntryPatch, NewListEntry},
    error::{AppError, AppResult},
    models::{ListEntry, WatchStatus},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub mal_id: i64,
    pub title: String,
    pub status: WatchStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub total_episodes: Option<i32>,
    /// Catalog genres of the title, captured for the taste profile
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub status: Option<WatchStatus>,
    pub rating: Option<f64>,
    pub episodes_watched: Option<i32>,
}

/// Handler returning the caller's watch list, most recently updated first
pub async fn index(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<ListEntry>>> {
    let entries = state.list_store.entries_for_user(user.id).await?;
    Ok(Json(entries))
}

/// Handler adding a title to the caller's watch list
pub async fn add(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<AddEntryRequest>,
) -> AppResult<(StatusCode, Json<ListEntry>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }
    if request.total_episodes.is_some_and(|count| count < 0) {
        return Err(AppError::InvalidInput(
            "Episode count cannot be negative".to_string(),
        ));
    }

    let entry = state
        .list_store
        .insert_entry(NewListEntry {
            user_id: user.id,
            mal_id: request.mal_id,
            title: request.title,
            status: request.status,
            image_url: request.image_url,
            total_episodes: request.total_episodes,
            genres: request.genres,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Handler updating status, rating or progress on an owned entry
pub async fn update(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(mal_id): Path<i64>,
    Json(request): Json<UpdateEntryRequest>,
) -> AppResult<Json<ListEntry>> {
    if request.status.is_none() && request.rating.is_none() && request.episodes_watched.is_none() {
        return Err(AppError::InvalidInput("No fields to update".to_string()));
    }
    if request
        .rating
        .is_some_and(|rating| !(0.0..=10.0).contains(&rating))
    {
        return Err(AppError::InvalidInput(
            "Rating must be between 0 and 10".to_string(),
        ));
    }
    if request.episodes_watched.is_some_and(|count| count < 0) {
        return Err(AppError::InvalidInput(
            "Episode count cannot be negative".to_string(),
        ));
    }

    let entry = state
        .list_store
        .update_entry(
            user.id,
            mal_id,
            ListEntryPatch {
                status: request.status,
                rating: request.rating,
                episodes_watched: request.episodes_watched,
            },
        )
        .await?;

    Ok(Json(entry))
}

/// Handler removing a title from the caller's watch list
pub async fn remove(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(mal_id): Path<i64>,
) -> AppResult<StatusCode> {
    state.list_store.delete_entry(user.id, mal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
