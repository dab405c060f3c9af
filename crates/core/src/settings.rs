//! Page-copy setting keys.
//!
//! Page copy is stored in the generic `settings` key/value table. The bare
//! key holds source-language text; translations use suffixed keys (see
//! [`crate::language::setting_key_for`]).

pub const WELCOME_TITLE: &str = "welcome_title";
pub const WELCOME_SUBTITLE: &str = "welcome_subtitle";
pub const LESSON_TITLE: &str = "lesson_title";
pub const LESSON_INTRODUCTION: &str = "lesson_introduction";
pub const LESSON_IMAGE: &str = "lesson_image";
pub const ABOUT_US_TITLE: &str = "about_us_title";
pub const ABOUT_US_CONTENT: &str = "about_us_content";

/// A translatable piece of page copy and its source-language default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCopyKey {
    pub key: &'static str,
    pub default: &'static str,
}

/// Page copy shown on the public page and edited in the bilingual editor,
/// in display order.
pub const PAGE_COPY: &[PageCopyKey] = &[
    PageCopyKey { key: WELCOME_TITLE, default: "Selamat Datang" },
    PageCopyKey { key: WELCOME_SUBTITLE, default: "" },
    PageCopyKey { key: LESSON_TITLE, default: "" },
    PageCopyKey { key: LESSON_INTRODUCTION, default: "" },
    PageCopyKey { key: ABOUT_US_TITLE, default: "Tentang Kami" },
    PageCopyKey { key: ABOUT_US_CONTENT, default: "" },
];

/// Source-language default for a page-copy key (empty when unknown).
pub fn default_for(key: &str) -> &'static str {
    PAGE_COPY
        .iter()
        .find(|k| k.key == key)
        .map(|k| k.default)
        .unwrap_or("")
}
