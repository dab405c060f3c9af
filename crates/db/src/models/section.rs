//! Section entity model and DTOs.

use renungan_core::hashing::source_fingerprint;
use renungan_core::localization::SectionField;
use renungan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub reflective_question: Option<String>,
    pub reflective_question_2: Option<String>,
    pub reflective_question_3: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub is_published: bool,
    pub title_id: Option<String>,
    pub content_id: Option<String>,
    pub reflective_question_id: Option<String>,
    pub reflective_question_2_id: Option<String>,
    pub reflective_question_3_id: Option<String>,
    pub title_en: Option<String>,
    pub content_en: Option<String>,
    pub reflective_question_en: Option<String>,
    pub reflective_question_2_en: Option<String>,
    pub reflective_question_3_en: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Section {
    /// Source-language value of a field (`None` for an absent question).
    pub fn base(&self, field: SectionField) -> Option<&str> {
        match field {
            SectionField::Title => Some(&self.title),
            SectionField::Content => Some(&self.content),
            SectionField::Question1 => self.reflective_question.as_deref(),
            SectionField::Question2 => self.reflective_question_2.as_deref(),
            SectionField::Question3 => self.reflective_question_3.as_deref(),
        }
    }

    /// Fingerprint of the source fields, stored with machine translations
    /// so edits invalidate them.
    pub fn source_hash(&self) -> String {
        source_fingerprint(SectionField::ALL.map(|field| self.base(field)))
    }

    /// Value of a field's dedicated language column, if the language has one.
    pub fn stored(&self, lang: &str, field: SectionField) -> Option<&str> {
        let value = match (lang, field) {
            ("id", SectionField::Title) => &self.title_id,
            ("id", SectionField::Content) => &self.content_id,
            ("id", SectionField::Question1) => &self.reflective_question_id,
            ("id", SectionField::Question2) => &self.reflective_question_2_id,
            ("id", SectionField::Question3) => &self.reflective_question_3_id,
            ("en", SectionField::Title) => &self.title_en,
            ("en", SectionField::Content) => &self.content_en,
            ("en", SectionField::Question1) => &self.reflective_question_en,
            ("en", SectionField::Question2) => &self.reflective_question_2_en,
            ("en", SectionField::Question3) => &self.reflective_question_3_en,
            _ => return None,
        };
        value.as_deref()
    }

    /// Whether any English column holds a translation.
    pub fn has_english(&self) -> bool {
        SectionField::ALL
            .iter()
            .any(|f| self.stored("en", *f).is_some_and(|v| !v.trim().is_empty()))
    }
}

/// DTO for creating a section.
#[derive(Debug, Clone)]
pub struct CreateSection {
    pub title: String,
    pub content: String,
    pub reflective_question: Option<String>,
    pub reflective_question_2: Option<String>,
    pub reflective_question_3: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub is_published: bool,
}

/// DTO for updating a section's source-language content.
///
/// `image_url` is only written when `Some`: the bilingual editor has no image
/// field and must not clear it.
#[derive(Debug, Clone)]
pub struct UpdateSection {
    pub title: String,
    pub content: String,
    pub reflective_question: Option<String>,
    pub reflective_question_2: Option<String>,
    pub reflective_question_3: Option<String>,
    pub image_url: Option<Option<String>>,
    pub is_published: bool,
}
