/// Anime catalog client abstraction
///
/// The external catalog (a Jikan v4 compatible API) is the single source of
/// titles, community scores and genre metadata. It is read-only, keyless and
/// aggressively rate limited, so all access goes through one client sharing
/// one process-wide request pacer.
use crate::{
    error::AppResult,
    models::{CatalogAnime, CatalogPage},
};

pub mod jikan;
pub mod rate_limit;

pub use jikan::JikanCatalog;
pub use rate_limit::RateLimiter;

/// Trait for anime catalog lookups
///
/// Every method maps to one upstream request and therefore consumes one
/// rate-limit slot. Pages are 1-based and sized by the upstream default.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Full-text title search. Rejects a blank query with `InvalidInput`
    /// before consuming a rate-limit slot.
    async fn search_anime(&self, query: &str, page: i32) -> AppResult<CatalogPage>;

    /// Titles ordered by community ranking
    async fn top_anime(&self, page: i32) -> AppResult<CatalogPage>;

    /// Titles carrying the given catalog genre id
    async fn anime_by_genre(&self, genre_id: i64, page: i32) -> AppResult<CatalogPage>;

    /// Single title lookup; `NotFound` when the catalog has no such id
    async fn anime_by_id(&self, mal_id: i64) -> AppResult<CatalogAnime>;
}
