//! Repository for the `section_translations` cache table.

use renungan_core::bilingual::SectionTranslationInput;
use renungan_core::types::DbId;
use sqlx::PgPool;

use crate::models::section_translation::SectionTranslation;

const COLUMNS: &str = "id, section_id, language, source_hash, title, content, reflective_question, \
                        reflective_question_2, reflective_question_3, created_at, updated_at";

/// Provides access to cached section translations.
pub struct SectionTranslationRepo;

impl SectionTranslationRepo {
    pub async fn find(
        pool: &PgPool,
        section_id: DbId,
        language: &str,
    ) -> Result<Option<SectionTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM section_translations WHERE section_id = $1 AND language = $2"
        );
        sqlx::query_as::<_, SectionTranslation>(&query)
            .bind(section_id)
            .bind(language)
            .fetch_optional(pool)
            .await
    }

    /// Every cached translation in `language`.
    pub async fn list_for_language(
        pool: &PgPool,
        language: &str,
    ) -> Result<Vec<SectionTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM section_translations WHERE language = $1 ORDER BY section_id"
        );
        sqlx::query_as::<_, SectionTranslation>(&query)
            .bind(language)
            .fetch_all(pool)
            .await
    }

    /// Store translations for one section and language, made from source
    /// text with fingerprint `source_hash`.
    ///
    /// While the fingerprint is unchanged, fields given as `None` keep what
    /// was cached before. A new fingerprint replaces the whole row.
    pub async fn upsert(
        pool: &PgPool,
        language: &str,
        source_hash: &str,
        input: &SectionTranslationInput,
    ) -> Result<SectionTranslation, sqlx::Error> {
        let query = format!(
            "INSERT INTO section_translations
                (section_id, language, source_hash, title, content, reflective_question,
                 reflective_question_2, reflective_question_3)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT ON CONSTRAINT uq_section_translations_section_language
             DO UPDATE SET
                title = {title},
                content = {content},
                reflective_question = {q1},
                reflective_question_2 = {q2},
                reflective_question_3 = {q3},
                source_hash = EXCLUDED.source_hash
             RETURNING {COLUMNS}",
            title = keep_if_current("title"),
            content = keep_if_current("content"),
            q1 = keep_if_current("reflective_question"),
            q2 = keep_if_current("reflective_question_2"),
            q3 = keep_if_current("reflective_question_3"),
        );
        sqlx::query_as::<_, SectionTranslation>(&query)
            .bind(input.section_id)
            .bind(language)
            .bind(source_hash)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.question_1)
            .bind(&input.question_2)
            .bind(&input.question_3)
            .fetch_one(pool)
            .await
    }

    /// Drop every cached translation of a section, e.g. after its source
    /// text changed. Returns the number of rows removed.
    pub async fn delete_for_section(pool: &PgPool, section_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM section_translations WHERE section_id = $1")
            .bind(section_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Conflict expression for `column`: merge into the existing row when it was
/// made from the same source text, otherwise take the new value outright.
fn keep_if_current(column: &str) -> String {
    format!(
        "CASE WHEN section_translations.source_hash = EXCLUDED.source_hash \
         THEN COALESCE(EXCLUDED.{column}, section_translations.{column}) \
         ELSE EXCLUDED.{column} END"
    )
}
