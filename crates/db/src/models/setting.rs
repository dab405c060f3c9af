//! Key/value setting model.

use renungan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Setting {
    pub id: DbId,
    pub key: String,
    pub value: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cached machine translation of a page-copy setting.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SettingTranslation {
    pub id: DbId,
    pub key: String,
    pub language: String,
    pub value: String,
    pub source_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
