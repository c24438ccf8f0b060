use std::sync::Arc;

use animeverse_api::{
    config::Config,
    db::{self, Cache, PgListStore, PgRecommendationStore, PgSessionStore},
    routes::{create_router, AppState},
    services::{
        browse::BrowseService,
        catalog::{CatalogClient, JikanCatalog},
        recommendations::RecommendationService,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // PostgreSQL pool with embedded migrations
    let pool = db::create_pool(&config.database_url).await?;
    db::MIGRATOR.run(&pool).await?;
    tracing::info!("Database migrations applied");

    // Redis cache with its background writer
    let redis_client = db::create_redis_client(&config.redis_url)?;
    let (cache, _cache_writer) = Cache::new(redis_client).await;

    // One catalog client, one rate limiter for the whole process
    let catalog: Arc<dyn CatalogClient> =
        Arc::new(JikanCatalog::new(config.catalog_api_url.clone())?);

    let list_store = Arc::new(PgListStore::new(pool.clone()));
    let rec_store = Arc::new(PgRecommendationStore::new(pool.clone()));

    let state = Arc::new(AppState {
        sessions: Arc::new(PgSessionStore::new(pool.clone())),
        list_store: list_store.clone(),
        rec_store: rec_store.clone(),
        browse: BrowseService::new(Arc::clone(&catalog), cache),
        recommendations: RecommendationService::new(catalog, list_store, rec_store),
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "animeverse-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
