//! Repository for the `comments` table.

use renungan_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithSection, CreateComment};

const COLUMNS: &str = "id, section_id, author_name, author_email, content, is_approved, \
                        created_at, updated_at";

/// Provides CRUD operations for reader comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment. It starts unapproved.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (section_id, author_name, author_email, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.section_id)
            .bind(&input.author_name)
            .bind(&input.author_email)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Comments with the given approval status, newest first, with the title
    /// of their section.
    pub async fn list_by_status(
        pool: &PgPool,
        approved: bool,
    ) -> Result<Vec<CommentWithSection>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithSection>(
            "SELECT c.id, c.section_id, s.title AS section_title, c.author_name,
                    c.author_email, c.content, c.is_approved, c.created_at
             FROM comments c
             JOIN sections s ON s.id = c.section_id
             WHERE c.is_approved = $1
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(approved)
        .fetch_all(pool)
        .await
    }

    /// Approved comments for the given sections, oldest first.
    pub async fn list_approved_for_sections(
        pool: &PgPool,
        section_ids: &[DbId],
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE is_approved = true AND section_id = ANY($1)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(section_ids)
            .fetch_all(pool)
            .await
    }

    /// Mark a comment approved. Returns `true` if the row exists.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE comments SET is_approved = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of comments awaiting moderation.
    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE is_approved = false")
            .fetch_one(pool)
            .await
    }
}
