//! Language codes understood by the site and the translation service.
//!
//! Content is authored in the source language (Indonesian unless configured
//! otherwise). English has dedicated `_en` columns; every other language is
//! served from the translation cache.

use serde::Serialize;

/// Default language that content is written in.
pub const SOURCE_LANGUAGE: &str = "id";

/// English, the language with dedicated translation columns.
pub const ENGLISH: &str = "en";

/// A language offered in the public language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Languages offered for translation.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "id", name: "Indonesian" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "zh", name: "Chinese (Simplified)" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "ru", name: "Russian" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "pl", name: "Polish" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "th", name: "Thai" },
];

/// Validate that `code` is one of [`SUPPORTED_LANGUAGES`].
pub fn validate_language_code(code: &str) -> Result<(), String> {
    if SUPPORTED_LANGUAGES.iter().any(|l| l.code == code) {
        Ok(())
    } else {
        Err(format!("Unsupported language '{code}'"))
    }
}

/// English display name for a language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.name)
}

/// Normalize a user-supplied language code (`"EN "` -> `"en"`).
///
/// Region subtags are dropped, so `"en-AU"` becomes `"en"`.
pub fn normalize_language_code(code: &str) -> String {
    let code = code.trim().to_ascii_lowercase();
    match code.split_once(|c: char| c == '-' || c == '_') {
        Some((primary, _)) => primary.to_string(),
        None => code,
    }
}

/// Setting key that stores `base` in `lang`.
///
/// The source language lives under the bare key; other languages use a
/// `_{lang}` suffix (`welcome_title_en`).
pub fn setting_key_for(base: &str, lang: &str, source: &str) -> String {
    if lang == source {
        base.to_string()
    } else {
        format!("{base}_{lang}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_codes_validate() {
        for lang in SUPPORTED_LANGUAGES {
            assert!(validate_language_code(lang.code).is_ok(), "{}", lang.code);
        }
        assert!(validate_language_code("xx").is_err());
        assert!(validate_language_code("").is_err());
    }

    #[test]
    fn names_resolve() {
        assert_eq!(language_name("id"), Some("Indonesian"));
        assert_eq!(language_name("zh"), Some("Chinese (Simplified)"));
        assert_eq!(language_name("tlh"), None);
    }

    #[test]
    fn normalization_strips_region_and_case() {
        assert_eq!(normalize_language_code(" EN "), "en");
        assert_eq!(normalize_language_code("en-AU"), "en");
        assert_eq!(normalize_language_code("pt_BR"), "pt");
    }

    #[test]
    fn setting_keys_are_suffixed_except_source() {
        assert_eq!(setting_key_for("welcome_title", "id", "id"), "welcome_title");
        assert_eq!(setting_key_for("welcome_title", "en", "id"), "welcome_title_en");
        assert_eq!(setting_key_for("lesson_title", "fr", "id"), "lesson_title_fr");
    }
}
