use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::AppResult,
    models::{CatalogAnime, CatalogPage},
    services::catalog::CatalogClient,
};

const PAGE_CACHE_TTL: u64 = 3600; // 1 hour
const DETAIL_CACHE_TTL: u64 = 86400; // 1 day

/// Catalog browsing with a Redis cache in front of the paced client.
///
/// Browse traffic is bursty and repetitive, so cached pages absorb most of
/// it without spending rate-limit slots. Recommendation generation does not
/// go through here; each run reads the catalog directly.
pub struct BrowseService {
    catalog: Arc<dyn CatalogClient>,
    cache: Cache,
}

impl BrowseService {
    pub fn new(catalog: Arc<dyn CatalogClient>, cache: Cache) -> Self {
        Self { catalog, cache }
    }

    pub async fn search(&self, query: &str, page: i32) -> AppResult<CatalogPage> {
        let key = CacheKey::AnimeSearch {
            query: query.to_string(),
            page,
        };
        cached!(self.cache, key, PAGE_CACHE_TTL, self.catalog.search_anime(query, page))
    }

    pub async fn top(&self, page: i32) -> AppResult<CatalogPage> {
        let key = CacheKey::TopAnime { page };
        cached!(self.cache, key, PAGE_CACHE_TTL, self.catalog.top_anime(page))
    }

    pub async fn by_genre(&self, genre_id: i64, page: i32) -> AppResult<CatalogPage> {
        let key = CacheKey::AnimeByGenre { genre_id, page };
        cached!(self.cache, key, PAGE_CACHE_TTL, self.catalog.anime_by_genre(genre_id, page))
    }

    pub async fn detail(&self, mal_id: i64) -> AppResult<CatalogAnime> {
        let key = CacheKey::AnimeDetail(mal_id);
        cached!(self.cache, key, DETAIL_CACHE_TTL, self.catalog.anime_by_id(mal_id))
    }
}
