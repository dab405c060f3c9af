//! Multi-language fallback and merge rules.
//!
//! Every translatable field has a base value (written in the source
//! language) and, per target language, possibly a stored translation. For a
//! requested language the displayed text is chosen as:
//!
//! 1. the stored translation, when present and non-blank;
//! 2. the base value, when the requested language *is* the source language;
//! 3. a fresh machine translation of the base value, batched with every
//!    other missing field into a single call;
//! 4. the base value again, when the translation call failed.
//!
//! [`LocalizationPlan`] performs steps 1-2 eagerly, gathers step 3 into a
//! [`TranslationBatch`], and [`LocalizationPlan::finish`] merges the result
//! (or the failure) back in.

use std::collections::HashMap;

use crate::types::DbId;

/// Languages with dedicated `_{lang}` columns on the `sections` table.
/// Only editors write these columns; machine translations for every
/// language live in `section_translations`.
pub const SECTION_COLUMN_LANGUAGES: &[&str] = &["id", "en"];

/// Whether `lang` has dedicated, editor-written section columns.
pub fn has_section_columns(lang: &str) -> bool {
    SECTION_COLUMN_LANGUAGES.contains(&lang)
}

/// Translatable fields of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionField {
    Title,
    Content,
    Question1,
    Question2,
    Question3,
}

impl SectionField {
    pub const ALL: [SectionField; 5] = [
        SectionField::Title,
        SectionField::Content,
        SectionField::Question1,
        SectionField::Question2,
        SectionField::Question3,
    ];

    /// Short name used in translation keys and form fields.
    pub fn short_name(self) -> &'static str {
        match self {
            SectionField::Title => "title",
            SectionField::Content => "content",
            SectionField::Question1 => "q1",
            SectionField::Question2 => "q2",
            SectionField::Question3 => "q3",
        }
    }

    /// Base column name in the `sections` table.
    pub fn column(self) -> &'static str {
        match self {
            SectionField::Title => "title",
            SectionField::Content => "content",
            SectionField::Question1 => "reflective_question",
            SectionField::Question2 => "reflective_question_2",
            SectionField::Question3 => "reflective_question_3",
        }
    }

    /// Whether the field may be absent on a section.
    pub fn is_optional(self) -> bool {
        !matches!(self, SectionField::Title | SectionField::Content)
    }
}

/// Translation key for a section field: `section_{id}_{field}`.
pub fn section_key(section_id: DbId, field: SectionField) -> String {
    format!("section_{section_id}_{}", field.short_name())
}

/// Choose display text from what is already stored.
///
/// Returns `None` when the field still needs a machine translation.
pub fn resolve_stored(lang: &str, source: &str, base: &str, stored: Option<&str>) -> Option<String> {
    if let Some(stored) = stored.filter(|s| !s.trim().is_empty()) {
        return Some(stored.to_string());
    }
    if lang == source || base.trim().is_empty() {
        return Some(base.to_string());
    }
    None
}

/// The stored candidate for a field: an editor's translation when it is not
/// blank, else a machine translation still valid for the current source.
pub fn stored_or_cached<'a>(human: Option<&'a str>, cached: Option<&'a str>) -> Option<&'a str> {
    human.filter(|s| !s.trim().is_empty()).or(cached)
}

/// Whether the bilingual editor should fetch machine translations instead
/// of showing what is stored.
pub fn editor_needs_refresh(refresh_requested: bool, any_stored: bool) -> bool {
    refresh_requested || !any_stored
}

/// Key -> text lookup with empty-string defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap(HashMap<String, String>);

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.0.insert(key.into(), text.into());
    }

    /// Text for `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Add every entry of `other`, overwriting existing keys.
    pub fn extend(&mut self, other: TranslationMap) {
        self.0.extend(other.0);
    }
}

/// The translation service returned a different number of texts than sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Translation batch mismatch: sent {sent} texts, received {received}")]
pub struct BatchMismatch {
    pub sent: usize,
    pub received: usize,
}

/// Ordered texts destined for one translation call, with the key each
/// result belongs to.
#[derive(Debug, Clone, Default)]
pub struct TranslationBatch {
    keys: Vec<String>,
    texts: Vec<String>,
}

impl TranslationBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `text` under `key`. Blank texts are skipped.
    pub fn push(&mut self, key: impl Into<String>, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.keys.push(key.into());
        self.texts.push(text.to_string());
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Pair translations (in send order) with their keys.
    pub fn apply(&self, translations: Vec<String>) -> Result<TranslationMap, BatchMismatch> {
        if translations.len() != self.keys.len() {
            return Err(BatchMismatch {
                sent: self.keys.len(),
                received: translations.len(),
            });
        }
        let mut map = TranslationMap::new();
        for (key, text) in self.keys.iter().zip(translations) {
            map.insert(key.clone(), text);
        }
        Ok(map)
    }
}

/// Result of [`LocalizationPlan::finish`].
#[derive(Debug, Clone, Default)]
pub struct Localized {
    /// Display text for every key added to the plan.
    pub texts: TranslationMap,
    /// Only the texts obtained from the translation service in this run,
    /// for the caller to persist as a cache.
    pub fresh: TranslationMap,
}

/// Resolves a set of fields for one target language.
#[derive(Debug, Clone)]
pub struct LocalizationPlan {
    lang: String,
    source: String,
    resolved: TranslationMap,
    pending: TranslationBatch,
    bases: HashMap<String, String>,
}

impl LocalizationPlan {
    pub fn new(lang: &str, source: &str) -> Self {
        Self {
            lang: lang.to_string(),
            source: source.to_string(),
            resolved: TranslationMap::new(),
            pending: TranslationBatch::new(),
            bases: HashMap::new(),
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Add a field with its base text and any stored translation.
    pub fn add(&mut self, key: impl Into<String>, base: &str, stored: Option<&str>) {
        let key = key.into();
        match resolve_stored(&self.lang, &self.source, base, stored) {
            Some(text) => self.resolved.insert(key, text),
            None => {
                self.pending.push(key.clone(), base);
                self.bases.insert(key, base.to_string());
            }
        }
    }

    /// Fields that still need a machine translation.
    pub fn pending(&self) -> &TranslationBatch {
        &self.pending
    }

    /// Merge a translation result into the plan.
    ///
    /// `translated` is `None` when the translation call failed or was not
    /// attempted; pending fields then fall back to their base text.
    pub fn finish(self, translated: Option<Vec<String>>) -> Result<Localized, BatchMismatch> {
        let mut texts = self.resolved;
        let fresh = match translated {
            Some(list) if !self.pending.is_empty() => self.pending.apply(list)?,
            _ => TranslationMap::new(),
        };
        for (key, base) in self.bases {
            match fresh.get_opt(&key) {
                Some(text) if !text.trim().is_empty() => texts.insert(key, text.to_string()),
                _ => texts.insert(key, base),
            }
        }
        Ok(Localized { texts, fresh })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn stored_translation_wins() {
        assert_eq!(
            resolve_stored("en", "id", "Selamat", Some("Welcome")),
            Some("Welcome".to_string())
        );
    }

    #[test]
    fn blank_stored_falls_through() {
        assert_eq!(resolve_stored("en", "id", "Selamat", Some("  ")), None);
        assert_eq!(
            resolve_stored("id", "id", "Selamat", Some("")),
            Some("Selamat".to_string())
        );
    }

    #[test]
    fn source_language_uses_base() {
        assert_eq!(
            resolve_stored("id", "id", "Selamat", None),
            Some("Selamat".to_string())
        );
    }

    #[test]
    fn empty_base_needs_no_translation() {
        assert_eq!(resolve_stored("fr", "id", "", None), Some(String::new()));
    }

    #[test]
    fn editor_translation_beats_cache() {
        assert_eq!(stored_or_cached(Some("Love"), Some("Affection")), Some("Love"));
        assert_eq!(stored_or_cached(Some(" "), Some("Affection")), Some("Affection"));
        assert_eq!(stored_or_cached(None, None), None);
    }

    #[test]
    fn editor_refresh_rules() {
        assert!(editor_needs_refresh(true, true));
        assert!(editor_needs_refresh(false, false));
        assert!(!editor_needs_refresh(false, true));
    }

    #[test]
    fn section_keys() {
        assert_eq!(section_key(7, SectionField::Title), "section_7_title");
        assert_eq!(section_key(7, SectionField::Question3), "section_7_q3");
        assert!(SectionField::Question1.is_optional());
        assert!(!SectionField::Content.is_optional());
    }

    #[test]
    fn batch_skips_blank_and_maps_back() {
        let mut batch = TranslationBatch::new();
        batch.push("a", "satu");
        batch.push("b", "   ");
        batch.push("c", "tiga");
        assert_eq!(batch.texts(), ["satu", "tiga"]);

        let map = batch.apply(vec!["one".into(), "three".into()]).unwrap();
        assert_eq!(map.get("a"), "one");
        assert_eq!(map.get("c"), "three");
        assert_eq!(map.get("b"), "");
        assert!(!map.contains("b"));
    }

    #[test]
    fn batch_length_mismatch_is_error() {
        let mut batch = TranslationBatch::new();
        batch.push("a", "satu");
        assert_matches!(
            batch.apply(vec![]),
            Err(BatchMismatch { sent: 1, received: 0 })
        );
    }

    #[test]
    fn plan_merges_stored_and_fresh() {
        let mut plan = LocalizationPlan::new("en", "id");
        plan.add("title", "Judul", Some("Title"));
        plan.add("body", "Isi", None);
        plan.add("empty", "", None);
        assert_eq!(plan.pending().texts(), ["Isi"]);

        let out = plan.finish(Some(vec!["Body".into()])).unwrap();
        assert_eq!(out.texts.get("title"), "Title");
        assert_eq!(out.texts.get("body"), "Body");
        assert_eq!(out.texts.get("empty"), "");
        assert_eq!(out.fresh.len(), 1);
        assert_eq!(out.fresh.get("body"), "Body");
    }

    #[test]
    fn plan_falls_back_to_base_on_failure() {
        let mut plan = LocalizationPlan::new("fr", "id");
        plan.add("title", "Judul", None);
        let out = plan.finish(None).unwrap();
        assert_eq!(out.texts.get("title"), "Judul");
        assert!(out.fresh.is_empty());
    }

    #[test]
    fn plan_for_source_language_never_translates() {
        let mut plan = LocalizationPlan::new("id", "id");
        plan.add("title", "Judul", None);
        assert!(plan.pending().is_empty());
        let out = plan.finish(None).unwrap();
        assert_eq!(out.texts.get("title"), "Judul");
    }

    #[test]
    fn plan_rejects_short_translation_list() {
        let mut plan = LocalizationPlan::new("en", "id");
        plan.add("a", "satu", None);
        plan.add("b", "dua", None);
        assert!(plan.finish(Some(vec!["one".into()])).is_err());
    }
}
