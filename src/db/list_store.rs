use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{GenreTag, ListEntry, WatchStatus};

/// Column list shared by every query returning full entry rows
const ENTRY_COLUMNS: &str = "id, user_id, mal_id, title, status, rating, \
    episodes_watched, total_episodes, image_url, created_at, updated_at";

/// A watch-list entry to insert, together with the catalog genres it
/// carried when the user added it.
#[derive(Debug, Clone)]
pub struct NewListEntry {
    pub user_id: Uuid,
    pub mal_id: i64,
    pub title: String,
    pub status: WatchStatus,
    pub image_url: Option<String>,
    pub total_episodes: Option<i32>,
    pub genres: Vec<String>,
}

/// Partial update of an owned entry; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ListEntryPatch {
    pub status: Option<WatchStatus>,
    pub rating: Option<f64>,
    pub episodes_watched: Option<i32>,
}

/// Persistence for watch-list entries and their genre tags
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListStore: Send + Sync {
    /// All entries owned by a user, most recently updated first
    async fn entries_for_user(&self, user_id: Uuid) -> AppResult<Vec<ListEntry>>;

    /// Genre tags attached to the given entries
    async fn genre_tags_for_entries(&self, entry_ids: &[Uuid]) -> AppResult<Vec<GenreTag>>;

    /// Inserts an entry and its genre tags. A second entry for the same
    /// title by the same user is rejected with `Conflict`.
    async fn insert_entry(&self, entry: NewListEntry) -> AppResult<ListEntry>;

    /// Applies a partial update to the user's entry for a title.
    /// `NotFound` when the user does not track that title.
    async fn update_entry(
        &self,
        user_id: Uuid,
        mal_id: i64,
        patch: ListEntryPatch,
    ) -> AppResult<ListEntry>;

    /// Removes the user's entry for a title; genre tags go with it.
    /// `NotFound` when the user does not track that title.
    async fn delete_entry(&self, user_id: Uuid, mal_id: i64) -> AppResult<()>;
}

/// PostgreSQL-backed list store
pub struct PgListStore {
    pool: PgPool,
}

impl PgListStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListStore for PgListStore {
    async fn entries_for_user(&self, user_id: Uuid) -> AppResult<Vec<ListEntry>> {
        let entries = sqlx::query_as::<_, ListEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM anime_lists
             WHERE user_id = $1
             ORDER BY updated_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn genre_tags_for_entries(&self, entry_ids: &[Uuid]) -> AppResult<Vec<GenreTag>> {
        if entry_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tags = sqlx::query_as::<_, GenreTag>(
            "SELECT anime_list_id, genre FROM anime_genres
             WHERE anime_list_id = ANY($1)",
        )
        .bind(entry_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    async fn insert_entry(&self, entry: NewListEntry) -> AppResult<ListEntry> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, ListEntry>(&format!(
            "INSERT INTO anime_lists (user_id, mal_id, title, status, image_url, total_episodes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(entry.user_id)
        .bind(entry.mal_id)
        .bind(&entry.title)
        .bind(entry.status)
        .bind(&entry.image_url)
        .bind(entry.total_episodes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("This anime is already in your list".to_string())
            }
            other => AppError::from(other),
        })?;

        for genre in &entry.genres {
            sqlx::query("INSERT INTO anime_genres (anime_list_id, genre) VALUES ($1, $2)")
                .bind(inserted.id)
                .bind(genre)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(inserted)
    }

    async fn update_entry(
        &self,
        user_id: Uuid,
        mal_id: i64,
        patch: ListEntryPatch,
    ) -> AppResult<ListEntry> {
        let updated = sqlx::query_as::<_, ListEntry>(&format!(
            "UPDATE anime_lists
             SET status = COALESCE($3, status),
                 rating = COALESCE($4, rating),
                 episodes_watched = COALESCE($5, episodes_watched),
                 updated_at = now()
             WHERE user_id = $1 AND mal_id = $2
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(user_id)
        .bind(mal_id)
        .bind(patch.status)
        .bind(patch.rating)
        .bind(patch.episodes_watched)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound("Anime not found in your list".to_string()))
    }

    async fn delete_entry(&self, user_id: Uuid, mal_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM anime_lists WHERE user_id = $1 AND mal_id = $2")
            .bind(user_id)
            .bind(mal_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Anime not found in your list".to_string()));
        }

        Ok(())
    }
}
