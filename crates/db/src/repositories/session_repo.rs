//! Repository for cookie login sessions in `user_sessions`.

use renungan_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{ActiveSession, CreateSession};

pub struct SessionRepo;

impl SessionRepo {
    /// Open a session at login. Returns its id.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO user_sessions (user_id, token_hash, expires_at, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.token_hash)
        .bind(input.expires_at)
        .bind(&input.user_agent)
        .fetch_one(pool)
        .await
    }

    /// The session behind a cookie, unless it was revoked or has expired.
    pub async fn find_active_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        sqlx::query_as::<_, ActiveSession>(
            "SELECT id, user_id, expires_at FROM user_sessions
             WHERE token_hash = $1 AND NOT is_revoked AND expires_at > NOW()",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Logout. Returns `false` when the session was already revoked.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE user_sessions SET is_revoked = true WHERE id = $1 AND NOT is_revoked")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sign a user out everywhere, e.g. after a password reset.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true WHERE user_id = $1 AND NOT is_revoked",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Remove sessions that can no longer authenticate.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE is_revoked OR expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
