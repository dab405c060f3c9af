//! Repository for the `sections` table.

use renungan_core::bilingual::SectionTranslationInput;
use renungan_core::localization::{has_section_columns, SectionField};
use renungan_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::section::{CreateSection, Section, UpdateSection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, reflective_question, reflective_question_2, \
    reflective_question_3, image_url, display_order, is_published, \
    title_id, content_id, reflective_question_id, reflective_question_2_id, \
    reflective_question_3_id, title_en, content_en, reflective_question_en, \
    reflective_question_2_en, reflective_question_3_en, created_at, updated_at";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section, returning the created row. Accepts a pool or an
    /// open transaction.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateSection,
    ) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections
                (title, content, reflective_question, reflective_question_2,
                 reflective_question_3, image_url, display_order, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.reflective_question)
            .bind(&input.reflective_question_2)
            .bind(&input.reflective_question_3)
            .bind(&input.image_url)
            .bind(input.display_order)
            .bind(input.is_published)
            .fetch_one(executor)
            .await
    }

    /// Find a section by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a section by ID only if it is published.
    pub async fn find_published_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1 AND is_published = true");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every section by display order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections ORDER BY display_order ASC, id ASC");
        sqlx::query_as::<_, Section>(&query).fetch_all(pool).await
    }

    /// List published sections by display order.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sections
             WHERE is_published = true
             ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, Section>(&query).fetch_all(pool).await
    }

    /// Highest display order in use, or `None` when there are no sections.
    pub async fn max_display_order(pool: &PgPool) -> Result<Option<i32>, sqlx::Error> {
        let row: (Option<i32>,) = sqlx::query_as("SELECT MAX(display_order) FROM sections")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update a section's source-language content. Display order is untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET
                title = $2,
                content = $3,
                reflective_question = $4,
                reflective_question_2 = $5,
                reflective_question_3 = $6,
                image_url = CASE WHEN $7 THEN $8 ELSE image_url END,
                is_published = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (set_image, image_url) = match &input.image_url {
            Some(url) => (true, url.clone()),
            None => (false, None),
        };
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.reflective_question)
            .bind(&input.reflective_question_2)
            .bind(&input.reflective_question_3)
            .bind(set_image)
            .bind(image_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a section (comments and cached translations cascade).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every section. Returns the number of rows removed.
    pub async fn delete_all<'e>(executor: impl PgExecutor<'e>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections").execute(executor).await?;
        Ok(result.rows_affected())
    }

    /// Assign `display_order = position` for each id in `order`, in one
    /// transaction. Unknown ids are ignored.
    pub async fn reorder(pool: &PgPool, order: &[DbId]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (position, id) in order.iter().enumerate() {
            sqlx::query("UPDATE sections SET display_order = $2 WHERE id = $1")
                .bind(id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await
    }

    /// Overwrite the dedicated `_{lang}` columns of a section.
    ///
    /// Fails with [`sqlx::Error::ColumnNotFound`] when `lang` has no columns.
    pub async fn set_language_columns(
        pool: &PgPool,
        lang: &str,
        input: &SectionTranslationInput,
    ) -> Result<bool, sqlx::Error> {
        let [title, content, q1, q2, q3] = language_columns(lang)?;
        let query = format!(
            "UPDATE sections SET {title} = $2, {content} = $3, {q1} = $4, {q2} = $5, {q3} = $6
             WHERE id = $1"
        );
        let result = sqlx::query(&query)
            .bind(input.section_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.question_1)
            .bind(&input.question_2)
            .bind(&input.question_3)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Column names for a language's dedicated section columns, in
/// [`SectionField::ALL`] order. Only whitelisted languages produce names, so
/// the result is safe to interpolate into SQL.
fn language_columns(lang: &str) -> Result<[String; 5], sqlx::Error> {
    if !has_section_columns(lang) {
        return Err(sqlx::Error::ColumnNotFound(format!(
            "sections has no columns for language '{lang}'"
        )));
    }
    Ok(SectionField::ALL.map(|f| format!("{}_{lang}", f.column())))
}
