//! User entity model and DTOs.

use renungan_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never render or serialize it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub full_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub full_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
