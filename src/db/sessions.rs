use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::AuthedUser;

/// Read-side view of the session store.
///
/// Sign-up, sign-in and session issuance are owned by the external auth
/// system; this service only resolves "who is calling" from a bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolves the account owning a session token. Returns `None` for
    /// unknown or expired sessions.
    async fn current_user(&self, token: Uuid) -> AppResult<Option<AuthedUser>>;
}

/// PostgreSQL-backed session store
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn current_user(&self, token: Uuid) -> AppResult<Option<AuthedUser>> {
        let user = sqlx::query_as::<_, AuthedUser>(
            "SELECT u.id, u.email, u.display_name
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token = $1
               AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
