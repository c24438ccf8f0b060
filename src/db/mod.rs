pub mod list_store;
pub mod postgres;
pub mod recommendation_store;
pub mod redis;
pub mod sessions;

pub use list_store::{ListEntryPatch, ListStore, NewListEntry, PgListStore};
pub use postgres::{create_pool, MIGRATOR};
pub use recommendation_store::{PgRecommendationStore, RecommendationStore};
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;
pub use sessions::{PgSessionStore, SessionStore};
