//! Repository for the `setting_translations` cache table.

use sqlx::PgPool;

use crate::models::setting::SettingTranslation;

const COLUMNS: &str = "id, key, language, value, source_hash, created_at, updated_at";

/// Provides access to cached machine translations of page copy.
pub struct SettingTranslationRepo;

impl SettingTranslationRepo {
    pub async fn list_for_language(
        pool: &PgPool,
        language: &str,
    ) -> Result<Vec<SettingTranslation>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM setting_translations WHERE language = $1 ORDER BY key");
        sqlx::query_as::<_, SettingTranslation>(&query)
            .bind(language)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace the cached translation of `key`.
    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        language: &str,
        value: &str,
        source_hash: &str,
    ) -> Result<SettingTranslation, sqlx::Error> {
        let query = format!(
            "INSERT INTO setting_translations (key, language, value, source_hash)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_setting_translations_key_language
             DO UPDATE SET value = EXCLUDED.value, source_hash = EXCLUDED.source_hash
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SettingTranslation>(&query)
            .bind(key)
            .bind(language)
            .bind(value)
            .bind(source_hash)
            .fetch_one(pool)
            .await
    }
}
