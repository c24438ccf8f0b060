use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Watch-list lifecycle state of an entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "watch_status", rename_all = "snake_case")]
pub enum WatchStatus {
    Watching,
    Completed,
    PlanToWatch,
    OnHold,
    Dropped,
}

/// One user's relationship to one catalog title
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ListEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Catalog identifier of the tracked title
    pub mal_id: i64,
    pub title: String,
    pub status: WatchStatus,
    /// Personal rating on a 0-10 scale, distinct from the catalog score
    pub rating: Option<f64>,
    pub episodes_watched: i32,
    pub total_episodes: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Genre label captured when an entry was added, keyed by the entry it
/// belongs to. These accumulate into the taste profile used for scoring.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct GenreTag {
    pub anime_list_id: Uuid,
    pub genre: String,
}
