//! Resolves page copy and section text for a requested language.
//!
//! Lookup order per field: an editor's translation (the `_{lang}` section
//! columns or the suffixed setting key), then a cached machine translation
//! whose source fingerprint still matches, then the source text for the
//! source language, then one batched machine translation whose results are
//! cached. Editor-written columns and keys are never touched here. A failing
//! translation service never fails the page; the source text is shown.

use std::collections::{BTreeMap, HashMap};

use renungan_core::bilingual::SectionTranslationInput;
use renungan_core::hashing::source_fingerprint;
use renungan_core::language::setting_key_for;
use renungan_core::localization::{
    has_section_columns, section_key, stored_or_cached, LocalizationPlan, SectionField,
    TranslationMap,
};
use renungan_core::settings::PAGE_COPY;
use renungan_core::types::DbId;
use renungan_db::models::section::Section;
use renungan_db::models::section_translation::SectionTranslation;
use renungan_db::repositories::{SectionTranslationRepo, SettingRepo, SettingTranslationRepo};
use renungan_translate::Translator;
use sqlx::PgPool;

use crate::error::AppError;
use crate::state::AppState;

/// Source-language page copy, with defaults for keys never saved.
pub async fn load_page_copy(pool: &PgPool) -> Result<BTreeMap<String, String>, sqlx::Error> {
    let keys: Vec<String> = PAGE_COPY.iter().map(|k| k.key.to_string()).collect();
    let stored = SettingRepo::get_many(pool, &keys).await?;
    Ok(PAGE_COPY
        .iter()
        .map(|k| {
            let value = stored
                .get(k.key)
                .cloned()
                .unwrap_or_else(|| k.default.to_string());
            (k.key.to_string(), value)
        })
        .collect())
}

/// Page-copy values stored for `lang` (suffixed keys), keyed by bare key.
/// Missing keys are absent.
pub async fn load_page_copy_translations(
    pool: &PgPool,
    lang: &str,
    source: &str,
) -> Result<HashMap<String, String>, sqlx::Error> {
    let keys: Vec<String> = PAGE_COPY
        .iter()
        .map(|k| setting_key_for(k.key, lang, source))
        .collect();
    let stored = SettingRepo::get_many(pool, &keys).await?;
    Ok(PAGE_COPY
        .iter()
        .filter_map(|k| {
            stored
                .get(&setting_key_for(k.key, lang, source))
                .map(|v| (k.key.to_string(), v.clone()))
        })
        .collect())
}

pub struct Localizer<'a> {
    pool: &'a PgPool,
    translator: &'a dyn Translator,
    source: &'a str,
}

impl<'a> Localizer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            pool: &state.pool,
            translator: state.translator.as_ref(),
            source: state.source_language(),
        }
    }

    /// Display text for `lang`, keyed by page-copy key and
    /// [`section_key`].
    pub async fn localize(
        &self,
        lang: &str,
        page_copy: &BTreeMap<String, String>,
        sections: &[Section],
    ) -> Result<TranslationMap, AppError> {
        let translating = lang != self.source;
        let mut plan = LocalizationPlan::new(lang, self.source);
        let mut hashes = CacheHashes::default();

        let (edited_copy, cached_copy) = if translating {
            let edited = load_page_copy_translations(self.pool, lang, self.source).await?;
            let cached: HashMap<String, (String, String)> =
                SettingTranslationRepo::list_for_language(self.pool, lang)
                    .await?
                    .into_iter()
                    .map(|t| (t.key, (t.value, t.source_hash)))
                    .collect();
            (edited, cached)
        } else {
            (HashMap::new(), HashMap::new())
        };
        for (key, base) in page_copy {
            let hash = copy_hash(base);
            let cached = cached_copy
                .get(key)
                .filter(|(_, stored_hash)| *stored_hash == hash)
                .map(|(value, _)| value.as_str());
            plan.add(
                key.clone(),
                base,
                stored_or_cached(edited_copy.get(key).map(String::as_str), cached),
            );
            hashes.copy.insert(key.clone(), hash);
        }

        let cached: HashMap<DbId, SectionTranslation> = if translating {
            SectionTranslationRepo::list_for_language(self.pool, lang)
                .await?
                .into_iter()
                .map(|t| (t.section_id, t))
                .collect()
        } else {
            HashMap::new()
        };

        for section in sections {
            let hash = section.source_hash();
            let current = cached.get(&section.id).filter(|t| t.is_current(&hash));
            for field in SectionField::ALL {
                let Some(base) = section.base(field) else {
                    continue;
                };
                let stored = if !translating {
                    None
                } else {
                    let edited = if has_section_columns(lang) {
                        section.stored(lang, field)
                    } else {
                        None
                    };
                    stored_or_cached(edited, current.and_then(|t| t.field(field)))
                };
                let key = section_key(section.id, field);
                hashes.fields.insert(key.clone(), (section.id, field));
                plan.add(key, base, stored);
            }
            hashes.sections.insert(section.id, hash);
        }

        let translated = self.translate_pending(&plan).await;
        let localized = plan
            .finish(translated)
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if !localized.fresh.is_empty() {
            self.persist(lang, &localized.fresh, &hashes).await;
        }
        Ok(localized.texts)
    }

    /// Run the single batched call for everything still missing. Failures
    /// are logged and yield `None`.
    async fn translate_pending(&self, plan: &LocalizationPlan) -> Option<Vec<String>> {
        let pending = plan.pending();
        if pending.is_empty() {
            return None;
        }
        match self
            .translator
            .translate_many(pending.texts(), plan.lang(), plan.source())
            .await
        {
            Ok(list) if list.len() == pending.len() => {
                tracing::debug!(lang = %plan.lang(), count = list.len(), "Translated page content");
                Some(list)
            }
            Ok(list) => {
                tracing::warn!(
                    lang = %plan.lang(),
                    sent = pending.len(),
                    received = list.len(),
                    "Translation count mismatch, showing source text",
                );
                None
            }
            Err(e) => {
                tracing::warn!(lang = %plan.lang(), error = %e, "Translation failed, showing source text");
                None
            }
        }
    }

    /// Cache fresh translations with the fingerprint of the text they were
    /// made from. Write failures are logged only.
    async fn persist(&self, lang: &str, fresh: &TranslationMap, hashes: &CacheHashes) {
        let mut per_section: BTreeMap<DbId, SectionTranslationInput> = BTreeMap::new();
        for (key, text) in fresh.iter() {
            if let Some((id, field)) = hashes.fields.get(key) {
                per_section
                    .entry(*id)
                    .or_insert_with(|| SectionTranslationInput::new(*id))
                    .set(*field, Some(text.to_string()));
            } else if let Some(hash) = hashes.copy.get(key) {
                if let Err(e) = SettingTranslationRepo::upsert(self.pool, key, lang, text, hash).await {
                    tracing::warn!(%key, %lang, error = %e, "Failed to cache translation");
                }
            }
        }

        for input in per_section.values() {
            let Some(hash) = hashes.sections.get(&input.section_id) else {
                continue;
            };
            if let Err(e) = SectionTranslationRepo::upsert(self.pool, lang, hash, input).await {
                tracing::warn!(section_id = input.section_id, %lang, error = %e, "Failed to cache section translation");
            }
        }
        tracing::info!(%lang, count = fresh.len(), "Cached machine translations");
    }
}

/// Where each planned key came from, and the source fingerprints to store
/// with its translation.
#[derive(Default)]
struct CacheHashes {
    copy: HashMap<String, String>,
    sections: HashMap<DbId, String>,
    fields: HashMap<String, (DbId, SectionField)>,
}

fn copy_hash(base: &str) -> String {
    source_fingerprint([Some(base)])
}
