//! Repository for the `settings` key/value table.

use std::collections::HashMap;

use sqlx::{PgExecutor, PgPool};

use crate::models::setting::Setting;

const COLUMNS: &str = "id, key, value, created_at, updated_at";

/// Provides access to key/value settings.
pub struct SettingRepo;

impl SettingRepo {
    pub async fn find(pool: &PgPool, key: &str) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE key = $1");
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Value of `key`, or `default` when the row is missing or its value is NULL.
    pub async fn get(pool: &PgPool, key: &str, default: &str) -> Result<String, sqlx::Error> {
        let value = Self::find(pool, key).await?.and_then(|s| s.value);
        Ok(value.unwrap_or_else(|| default.to_string()))
    }

    /// Values for several keys at once. Missing keys and NULL values are absent
    /// from the result.
    pub async fn get_many(
        pool: &PgPool,
        keys: &[String],
    ) -> Result<HashMap<String, String>, sqlx::Error> {
        let rows: Vec<(String, Option<String>)> =
            sqlx::query_as("SELECT key, value FROM settings WHERE key = ANY($1)")
                .bind(keys)
                .fetch_all(pool)
                .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect())
    }

    /// Insert or overwrite a setting. Accepts a pool or an open transaction.
    pub async fn set<'e>(
        executor: impl PgExecutor<'e>,
        key: &str,
        value: &str,
    ) -> Result<Setting, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (key, value) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_settings_key
             DO UPDATE SET value = EXCLUDED.value
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(executor)
            .await
    }

    /// Insert a setting only if the key does not exist yet.
    ///
    /// Returns `true` if a row was created.
    pub async fn set_if_absent(pool: &PgPool, key: &str, value: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO settings (key, value) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_settings_key DO NOTHING",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
