//! Comment entity model and DTOs.

use renungan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub section_id: DbId,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub is_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment joined with the title of the section it belongs to, for the
/// moderation queue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithSection {
    pub id: DbId,
    pub section_id: DbId,
    pub section_title: String,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub is_approved: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a comment. New comments always await approval.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub section_id: DbId,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}
