//! Side-by-side editor: source language on the left, English on the right.

use std::collections::BTreeMap;

use renungan_core::localization::{section_key, SectionField, TranslationMap};
use renungan_core::settings::PAGE_COPY;
use renungan_db::models::section::Section;

use super::{admin_layout, checked, esc};
use crate::flash::Flash;
use crate::middleware::auth::AuthUser;

pub struct BilingualPage<'a> {
    pub user: &'a AuthUser,
    pub flash: &'a Flash,
    /// Source-language page copy by bare key.
    pub source_copy: &'a BTreeMap<String, String>,
    /// English text by page-copy key and section key.
    pub translated: &'a TranslationMap,
    pub sections: &'a [Section],
    pub translation_error: Option<&'a str>,
    pub has_stored: bool,
}

fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Single-line input for titles, textarea for everything else.
fn input(name: &str, value: &str, single_line: bool) -> String {
    if single_line {
        format!("<input type=\"text\" name=\"{}\" value=\"{}\">", esc(name), esc(value))
    } else {
        format!("<textarea name=\"{}\">{}</textarea>", esc(name), esc(value))
    }
}

/// English inputs sit next to the source forms but submit with the
/// `translations` form through the `form` attribute.
fn english_input(name: &str, value: &str, single_line: bool) -> String {
    input(name, value, single_line).replacen(" name=", " form=\"translations\" name=", 1)
}

pub fn render(page: &BilingualPage<'_>) -> String {
    let mut body = String::new();
    if let Some(err) = page.translation_error {
        body.push_str(&format!(
            "<p class=\"flash-error\">Automatic translation unavailable: {}</p>\n",
            esc(err)
        ));
    }
    body.push_str(if page.has_stored {
        "<p>Showing saved English translations. \
         <a href=\"/admin/bilingual?refresh=1\">Refresh from translation service</a></p>\n"
    } else {
        "<p>No saved English translations; showing machine suggestions.</p>\n"
    });

    body.push_str(
        "<form id=\"translations\" method=\"post\" action=\"/admin/bilingual/translations\">\
         <button type=\"submit\">Save English translations</button></form>\n",
    );
    body.push_str(&page_copy_forms(page));
    body.push_str(&section_forms(page));
    body.push_str(&new_section_form());
    admin_layout(page.user, "Bilingual Editor", page.flash, &body)
}

fn page_copy_forms(page: &BilingualPage<'_>) -> String {
    let mut source = String::from(
        "<h2>Page text</h2>\n<div style=\"display:flex;gap:1rem\">\
         <form method=\"post\" action=\"/admin/bilingual/settings\" style=\"flex:1\"><h3>Source</h3>",
    );
    let mut english = String::from("<div style=\"flex:1\"><h3>English</h3>");
    for copy in PAGE_COPY {
        let single = copy.key.ends_with("_title");
        let base = page
            .source_copy
            .get(copy.key)
            .map(String::as_str)
            .unwrap_or(copy.default);
        source.push_str(&format!(
            "<label>{} {}</label>",
            esc(&label(copy.key)),
            input(copy.key, base, single)
        ));
        english.push_str(&format!(
            "<label>{} {}</label>",
            esc(&label(copy.key)),
            english_input(
                &format!("{}_en", copy.key),
                page.translated.get(copy.key),
                single
            )
        ));
    }
    source.push_str("<button type=\"submit\">Save source text</button></form>");
    english.push_str("</div>");
    format!("{source}{english}</div>\n")
}

fn section_forms(page: &BilingualPage<'_>) -> String {
    let mut out = String::from("<h2>Sections</h2>\n");
    for s in page.sections {
        let q = |v: &Option<String>| v.clone().unwrap_or_default();
        out.push_str(&format!(
            "<details id=\"section-{id}\"><summary>{title}</summary>\
             <div style=\"display:flex;gap:1rem\">\
             <form method=\"post\" action=\"/admin/bilingual/sections/{id}\" style=\"flex:1\">\
             <label>Title {}</label><label>Content {}</label>\
             <label>Question 1 {}</label><label>Question 2 {}</label><label>Question 3 {}</label>\
             <label><input type=\"checkbox\" name=\"is_published\"{published}> Published</label>\
             <button type=\"submit\">Save section</button></form>\
             <div style=\"flex:1\">",
            input("title", &s.title, true),
            input("content", &s.content, false),
            input("reflective_question", &q(&s.reflective_question), false),
            input("reflective_question_2", &q(&s.reflective_question_2), false),
            input("reflective_question_3", &q(&s.reflective_question_3), false),
            id = s.id,
            title = esc(&s.title),
            published = checked(s.is_published),
        ));
        for field in SectionField::ALL {
            let name = format!("sections[{}][{}_en]", s.id, field.short_name());
            out.push_str(&format!(
                "<label>{} {}</label>",
                esc(field.short_name()),
                english_input(
                    &name,
                    page.translated.get(&section_key(s.id, field)),
                    field == SectionField::Title
                )
            ));
        }
        out.push_str(&format!(
            "</div></div><form method=\"post\" action=\"/admin/bilingual/sections/{}/delete\">\
             <button type=\"submit\">Delete section</button></form></details>\n",
            s.id
        ));
    }
    out
}

fn new_section_form() -> String {
    "<h2>New section</h2>\n<form method=\"post\" action=\"/admin/bilingual/sections\">\
     <label>Title <input type=\"text\" name=\"title\" required></label>\
     <label>Content <textarea name=\"content\" required></textarea></label>\
     <label>Question 1 <textarea name=\"reflective_question\"></textarea></label>\
     <label>Question 2 <textarea name=\"reflective_question_2\"></textarea></label>\
     <label>Question 3 <textarea name=\"reflective_question_3\"></textarea></label>\
     <label><input type=\"checkbox\" name=\"is_published\"> Published</label>\
     <button type=\"submit\">Create section</button></form>\n"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_from_keys() {
        assert_eq!(label("welcome_title"), "Welcome title");
        assert_eq!(label(""), "");
    }

    #[test]
    fn english_inputs_join_translation_form() {
        let html = english_input("sections[4][title_en]", "Jude", true);
        assert!(html.starts_with("<input type=\"text\" form=\"translations\" name="));
        let html = english_input("about_us_content_en", "", false);
        assert!(html.starts_with("<textarea form=\"translations\" name="));
    }
}
