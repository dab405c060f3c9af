//! Repository for the `contact_submissions` table.

use renungan_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_submission::{ContactSubmission, CreateContactSubmission};

const COLUMNS: &str = "id, first_name, last_name, town, email, want_follow_jesus, want_bible, \
                        want_prayer_request, want_ask_question, message, created_at, updated_at";

/// Provides CRUD operations for contact-form submissions.
pub struct ContactSubmissionRepo;

impl ContactSubmissionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactSubmission,
    ) -> Result<ContactSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_submissions
                (first_name, last_name, town, email, want_follow_jesus, want_bible,
                 want_prayer_request, want_ask_question, message)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.town)
            .bind(&input.email)
            .bind(input.want_follow_jesus)
            .bind(input.want_bible)
            .bind(input.want_prayer_request)
            .bind(input.want_ask_question)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// All submissions, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_submissions ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
