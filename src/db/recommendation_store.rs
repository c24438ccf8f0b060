use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Recommendation;

/// Persistence for generated recommendation sets
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// The user's current set, best catalog score first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Recommendation>>;

    /// Atomically replaces the user's stored set with `recs`.
    ///
    /// Readers never observe a half-written set, and concurrent runs for the
    /// same user serialize so the final state is one run's complete output.
    async fn replace_for_user(&self, user_id: Uuid, recs: &[Recommendation]) -> AppResult<()>;
}

/// PostgreSQL-backed recommendation store
pub struct PgRecommendationStore {
    pool: PgPool,
}

impl PgRecommendationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationStore for PgRecommendationStore {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Recommendation>> {
        let recs = sqlx::query_as::<_, Recommendation>(
            "SELECT user_id, mal_id, title, image_url, score, reason
             FROM recommendations
             WHERE user_id = $1
             ORDER BY score DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(recs)
    }

    async fn replace_for_user(&self, user_id: Uuid, recs: &[Recommendation]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Transaction-scoped advisory lock keyed on the user, so two
        // concurrent regenerations for the same user run one after the other
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM recommendations WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if !recs.is_empty() {
            let mut builder: sqlx::QueryBuilder<sqlx::Postgres> = sqlx::QueryBuilder::new(
                "INSERT INTO recommendations (user_id, mal_id, title, image_url, score, reason) ",
            );
            builder.push_values(recs, |mut row, rec| {
                row.push_bind(rec.user_id)
                    .push_bind(rec.mal_id)
                    .push_bind(&rec.title)
                    .push_bind(&rec.image_url)
                    .push_bind(rec.score)
                    .push_bind(&rec.reason);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
