//! Parsing for the bilingual editor's "save translations" form.
//!
//! The form posts page-copy translations as flat fields
//! (`welcome_title_en=...`) and section translations as bracketed fields
//! (`sections[12][title_en]=...`). URL-encoded forms have no nesting, so the
//! handler receives every field as a flat key/value list and this module
//! regroups it.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::localization::SectionField;
use crate::types::DbId;

/// Translations of one section's fields. Blank values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTranslationInput {
    pub section_id: DbId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub question_1: Option<String>,
    pub question_2: Option<String>,
    pub question_3: Option<String>,
}

impl SectionTranslationInput {
    pub fn new(section_id: DbId) -> Self {
        Self {
            section_id,
            ..Default::default()
        }
    }

    pub fn field(&self, field: SectionField) -> Option<&str> {
        match field {
            SectionField::Title => self.title.as_deref(),
            SectionField::Content => self.content.as_deref(),
            SectionField::Question1 => self.question_1.as_deref(),
            SectionField::Question2 => self.question_2.as_deref(),
            SectionField::Question3 => self.question_3.as_deref(),
        }
    }

    pub fn set(&mut self, field: SectionField, value: Option<String>) {
        let slot = match field {
            SectionField::Title => &mut self.title,
            SectionField::Content => &mut self.content,
            SectionField::Question1 => &mut self.question_1,
            SectionField::Question2 => &mut self.question_2,
            SectionField::Question3 => &mut self.question_3,
        };
        *slot = value;
    }
}

/// Parsed "save translations" form for one target language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationsForm {
    /// Setting key (with language suffix) -> value. Blank values are kept as
    /// empty strings so a translation can be cleared.
    pub settings: BTreeMap<String, String>,
    pub sections: Vec<SectionTranslationInput>,
}

fn section_field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^sections\[(\d+)\]\[(title|content|q1|q2|q3)_([a-z]{2})\]$")
            .expect("section field pattern is valid")
    })
}

fn field_from_short(name: &str) -> Option<SectionField> {
    SectionField::ALL.into_iter().find(|f| f.short_name() == name)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Regroup flat form fields into setting and section translations for `lang`.
///
/// Only setting keys listed in `setting_keys` (bare, without suffix) are
/// accepted; section fields in another language and unknown fields are
/// ignored. Sections are returned in ascending id order.
pub fn parse_translations_form<'a, I>(fields: I, lang: &str, setting_keys: &[&str]) -> TranslationsForm
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let suffix = format!("_{lang}");
    let mut settings = BTreeMap::new();
    let mut sections: BTreeMap<DbId, SectionTranslationInput> = BTreeMap::new();

    for (name, value) in fields {
        if let Some(caps) = section_field_regex().captures(name) {
            if &caps[3] != lang {
                continue;
            }
            let Ok(id) = caps[1].parse::<DbId>() else {
                continue;
            };
            let Some(field) = field_from_short(&caps[2]) else {
                continue;
            };
            sections
                .entry(id)
                .or_insert_with(|| SectionTranslationInput::new(id))
                .set(field, non_blank(value));
            continue;
        }

        if let Some(base) = name.strip_suffix(&suffix) {
            if setting_keys.contains(&base) {
                settings.insert(name.to_string(), value.trim().to_string());
            }
        }
    }

    TranslationsForm {
        settings,
        sections: sections.into_values().collect(),
    }
}
