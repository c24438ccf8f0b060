/// Jikan v4 catalog client
///
/// Jikan is a free mirror of MyAnimeList data. It needs no API key but caps
/// clients at roughly one request per second, so every call waits on the
/// shared rate limiter before touching the network.
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogAnime, CatalogPage, JikanDetailResponse, JikanListResponse},
    services::catalog::{CatalogClient, RateLimiter},
};

/// Minimum spacing between outbound catalog requests
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

/// Upstream responses regularly take seconds under load; anything past this
/// is treated as an outage
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Page size used for every list endpoint
const PAGE_SIZE: u32 = 20;

pub struct JikanCatalog {
    http_client: HttpClient,
    api_url: String,
    limiter: Arc<RateLimiter>,
}

impl JikanCatalog {
    /// Creates a catalog client with its own rate limiter.
    ///
    /// Use this only when the process has exactly one catalog client;
    /// otherwise share a limiter via [`with_limiter`](Self::with_limiter).
    pub fn new(api_url: String) -> AppResult<Self> {
        Self::with_limiter(api_url, Arc::new(RateLimiter::new(MIN_REQUEST_INTERVAL)))
    }

    /// Creates a catalog client sharing an externally owned rate limiter
    pub fn with_limiter(api_url: String, limiter: Arc<RateLimiter>) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url,
            limiter,
        })
    }

    /// Dispatches one paced request against a list endpoint
    async fn fetch_page(&self, path: &str, params: &[(&str, String)]) -> AppResult<CatalogPage> {
        self.limiter.wait_for_slot().await;

        let url = format!("{}{}", self.api_url, path);
        let response = self.http_client.get(&url).query(params).send().await?;

        Self::check_status(response.status())?;

        let body: JikanListResponse = response.json().await.map_err(|e| {
            AppError::CatalogUnavailable(format!("Malformed catalog response: {}", e))
        })?;

        Ok(body.into())
    }

    /// Maps upstream status codes onto application errors
    fn check_status(status: StatusCode) -> AppResult<()> {
        match status {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => {
                Err(AppError::NotFound("Anime not found in catalog".to_string()))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::CatalogUnavailable(
                "Catalog rate limit exceeded".to_string(),
            )),
            other => Err(AppError::CatalogUnavailable(format!(
                "Catalog returned status {}",
                other
            ))),
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for JikanCatalog {
    async fn search_anime(&self, query: &str, page: i32) -> AppResult<CatalogPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        self.fetch_page(
            "/anime",
            &[
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("limit", PAGE_SIZE.to_string()),
            ],
        )
        .await
    }

    async fn top_anime(&self, page: i32) -> AppResult<CatalogPage> {
        self.fetch_page(
            "/top/anime",
            &[
                ("page", page.to_string()),
                ("limit", PAGE_SIZE.to_string()),
            ],
        )
        .await
    }

    async fn anime_by_genre(&self, genre_id: i64, page: i32) -> AppResult<CatalogPage> {
        self.fetch_page(
            "/anime",
            &[
                ("genres", genre_id.to_string()),
                ("page", page.to_string()),
                ("limit", PAGE_SIZE.to_string()),
            ],
        )
        .await
    }

    async fn anime_by_id(&self, mal_id: i64) -> AppResult<CatalogAnime> {
        self.limiter.wait_for_slot().await;

        let url = format!("{}/anime/{}", self.api_url, mal_id);
        let response = self.http_client.get(&url).send().await?;

        Self::check_status(response.status())?;

        let body: JikanDetailResponse = response.json().await.map_err(|e| {
            AppError::CatalogUnavailable(format!("Malformed catalog response: {}", e))
        })?;

        Ok(body.data.into())
    }
}
