//! Login session rows.

use renungan_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// The part of a live `user_sessions` row the auth extractor needs.
#[derive(Debug, Clone, FromRow)]
pub struct ActiveSession {
    pub id: DbId,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

/// A session to open at login. `token_hash` is the SHA-256 of the cookie token.
pub struct CreateSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
}
