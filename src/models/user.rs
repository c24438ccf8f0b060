use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account resolved from a session token.
///
/// Accounts are provisioned by the external auth system; this service only
/// ever reads them to attribute list entries and recommendations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct AuthedUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
}
