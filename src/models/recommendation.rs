use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted recommendation for one user.
///
/// Rows are disposable: each generation run replaces the user's whole set.
/// `score` is the catalog's community rating at generation time (0 when the
/// catalog had none), which is what clients sort and display by.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Recommendation {
    pub user_id: Uuid,
    pub mal_id: i64,
    pub title: String,
    pub image_url: Option<String>,
    pub score: f64,
    /// Human-readable one-liner explaining why the title was picked
    pub reason: String,
}
