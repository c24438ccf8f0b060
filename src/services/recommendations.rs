use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{ListStore, RecommendationStore},
    error::AppResult,
    models::{CatalogAnime, Recommendation},
    services::{catalog::CatalogClient, profile, scoring},
};

/// Maximum recommendations persisted per generation run
const MAX_RECOMMENDATIONS: usize = 20;

/// Number of favorite genres expanded into candidate searches
const GENRE_SEARCH_LIMIT: usize = 2;

/// Generates personalized anime recommendations.
///
/// A run reads the user's watch list and genre tags, gathers candidate
/// titles from the catalog, scores each candidate against the user's taste
/// profile, and replaces the user's stored recommendation set with the
/// winners. Runs are synchronous and keep no state between invocations.
pub struct RecommendationService {
    catalog: Arc<dyn CatalogClient>,
    list_store: Arc<dyn ListStore>,
    rec_store: Arc<dyn RecommendationStore>,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        list_store: Arc<dyn ListStore>,
        rec_store: Arc<dyn RecommendationStore>,
    ) -> Self {
        Self {
            catalog,
            list_store,
            rec_store,
        }
    }

    /// Runs one generation pass for a user and returns how many
    /// recommendations were stored. The previous set is replaced wholesale,
    /// so a run that finds nothing leaves the user with an empty set.
    pub async fn generate(&self, user_id: Uuid) -> AppResult<usize> {
        let entries = self.list_store.entries_for_user(user_id).await?;
        let entry_ids: Vec<Uuid> = entries.iter().map(|entry| entry.id).collect();
        let tags = self.list_store.genre_tags_for_entries(&entry_ids).await?;

        let favorites = profile::favorite_genres(&tags);

        let candidates = self.gather_candidates(&favorites).await?;

        tracing::info!(
            user_id = %user_id,
            list_size = entries.len(),
            favorite_genres = favorites.len(),
            candidates = candidates.len(),
            "Scoring recommendation candidates"
        );

        let mut scored: Vec<(CatalogAnime, f64)> = candidates
            .into_iter()
            .map(|anime| {
                let affinity = scoring::affinity_score(&anime, &entries, &favorites);
                (anime, affinity)
            })
            .filter(|(_, affinity)| *affinity > 0.0)
            .collect();

        // Stable sort: candidates with equal affinity keep gathering order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(MAX_RECOMMENDATIONS);

        let recs: Vec<Recommendation> = scored
            .into_iter()
            .map(|(anime, _)| {
                let reason = scoring::recommendation_reason(&anime, &favorites);
                Recommendation {
                    user_id,
                    mal_id: anime.mal_id,
                    title: anime.title,
                    image_url: anime.image_url,
                    // Clients sort by the catalog's own rating, not affinity
                    score: anime.score.unwrap_or(0.0),
                    reason,
                }
            })
            .collect();

        self.rec_store.replace_for_user(user_id, &recs).await?;

        tracing::info!(user_id = %user_id, count = recs.len(), "Recommendation set replaced");

        Ok(recs.len())
    }

    /// Builds the candidate pool: the first page of the popularity ranking,
    /// plus one search per favorite genre (at most two).
    ///
    /// The popularity fetch is mandatory and aborts the run on failure. The
    /// genre searches run in parallel and are best-effort: a failed search
    /// is logged and contributes nothing. Duplicates across sources keep
    /// their first occurrence.
    async fn gather_candidates(&self, favorites: &[String]) -> AppResult<Vec<CatalogAnime>> {
        let top = self.catalog.top_anime(1).await?;
        let mut pool = top.items;

        let mut tasks = Vec::new();
        for genre in favorites.iter().take(GENRE_SEARCH_LIMIT) {
            let catalog = Arc::clone(&self.catalog);
            let genre = genre.clone();
            let task = tokio::spawn(async move {
                let result = catalog.search_anime(&genre, 1).await;
                (genre, result)
            });
            tasks.push(task);
        }

        for task in tasks {
            match task.await {
                Ok((_, Ok(page))) => pool.extend(page.items),
                Ok((genre, Err(e))) => {
                    tracing::warn!(genre = %genre, error = %e, "Genre search failed, skipping");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Genre search task panicked, skipping");
                }
            }
        }

        let mut seen = HashSet::new();
        pool.retain(|anime| seen.insert(anime.mal_id));

        Ok(pool)
    }
}
