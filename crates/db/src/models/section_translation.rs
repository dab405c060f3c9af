//! Cached machine translations of section text.

use renungan_core::localization::SectionField;
use renungan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `section_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SectionTranslation {
    pub id: DbId,
    pub section_id: DbId,
    pub language: String,
    pub source_hash: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub reflective_question: Option<String>,
    pub reflective_question_2: Option<String>,
    pub reflective_question_3: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SectionTranslation {
    /// Whether the row was translated from the section's current text.
    pub fn is_current(&self, source_hash: &str) -> bool {
        self.source_hash == source_hash
    }

    pub fn field(&self, field: SectionField) -> Option<&str> {
        match field {
            SectionField::Title => self.title.as_deref(),
            SectionField::Content => self.content.as_deref(),
            SectionField::Question1 => self.reflective_question.as_deref(),
            SectionField::Question2 => self.reflective_question_2.as_deref(),
            SectionField::Question3 => self.reflective_question_3.as_deref(),
        }
    }
}
