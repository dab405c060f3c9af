//! Server-rendered HTML.
//!
//! Pages are plain `String`s built with `format!`. Every value that came
//! from a visitor or the database goes through [`esc`]; admin-authored rich
//! text (section bodies, page copy) goes through [`rich`], which keeps safe
//! markup and strips scripts and event handlers.

pub mod bilingual;
pub mod comments;
pub mod contacts;
pub mod error;
pub mod home;
pub mod login;
pub mod sections;
pub mod settings;

use renungan_core::roles::ROLE_ADMIN;
use renungan_core::validation::FieldErrors;

use crate::flash::{Flash, ERROR, ERRORS, SUCCESS};
use crate::middleware::auth::AuthUser;

/// Escape text for use in element content or a quoted attribute.
pub fn esc(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Sanitize admin-authored HTML.
pub fn rich(html: &str) -> String {
    ammonia::clean(html)
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;color:#222}\
main{max-width:960px;margin:0 auto;padding:1.5rem}\
nav{background:#2c3e50;padding:.75rem 1.5rem}nav a{color:#fff;margin-right:1rem}\
.flash-success{background:#e6f4ea;padding:.75rem}.flash-error{background:#fdecea;padding:.75rem}\
.error{color:#b00020;font-size:.9em}table{width:100%;border-collapse:collapse}\
td,th{border-bottom:1px solid #ddd;padding:.4rem;text-align:left}\
details{border:1px solid #ddd;margin:.5rem 0;padding:.5rem}\
textarea{width:100%;min-height:6rem}input[type=text],input[type=email],input[type=url]{width:100%}";

/// Complete HTML document.
pub fn layout(title: &str, lang: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        lang = esc(lang),
        title = esc(title),
    )
}

/// Document with the admin navigation bar. Contributors only see the
/// bilingual editor link.
pub fn admin_layout(user: &AuthUser, title: &str, flash: &Flash, body: &str) -> String {
    let mut nav = String::from("<nav>");
    if user.role == ROLE_ADMIN {
        nav.push_str(
            "<a href=\"/admin/sections\">Sections</a>\
             <a href=\"/admin/comments\">Comments</a>\
             <a href=\"/admin/contacts\">Contacts</a>\
             <a href=\"/admin/settings\">Settings</a>",
        );
    }
    nav.push_str("<a href=\"/admin/bilingual\">Bilingual Editor</a><a href=\"/\">View site</a>");
    nav.push_str(&format!(
        "<form method=\"post\" action=\"/logout\" style=\"display:inline\">\
         <span style=\"color:#fff\">{}</span> <button type=\"submit\">Logout</button></form></nav>",
        esc(user.display_name())
    ));

    let main = format!(
        "{nav}\n<main>\n<h1>{}</h1>\n{}{}\n</main>",
        esc(title),
        flash_banner(flash),
        body
    );
    layout(title, "en", &main)
}

/// Success and error banners for the admin pages.
pub fn flash_banner(flash: &Flash) -> String {
    let mut out = String::new();
    if let Some(msg) = flash.message(SUCCESS) {
        out.push_str(&format!("<p class=\"flash-success\">{}</p>\n", esc(msg)));
    }
    if let Some(msg) = flash.message(ERROR) {
        out.push_str(&format!("<p class=\"flash-error\">{}</p>\n", esc(msg)));
    }
    if let Some(errors) = flash.errors(ERRORS) {
        out.push_str(&error_list(errors));
    }
    out
}

/// `<ul>` of validation messages, empty when there are none.
pub fn error_list(errors: &FieldErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|(_, msg)| format!("<li>{}</li>", esc(msg)))
        .collect();
    format!("<ul class=\"flash-error\">{items}</ul>\n")
}

/// Inline message for one form field.
pub fn field_error(errors: Option<&FieldErrors>, field: &str) -> String {
    match errors.and_then(|e| e.get(field)) {
        Some(msg) => format!("<div class=\"error\">{}</div>", esc(msg)),
        None => String::new(),
    }
}

pub(crate) fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_neutralizes_markup() {
        let out = esc("<script>alert(1)</script>");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
    }

    #[test]
    fn rich_keeps_formatting_and_drops_scripts() {
        let out = rich("<p onclick=\"x()\"><strong>Amen</strong></p><script>bad()</script>");
        assert!(out.contains("<strong>Amen</strong>"));
        assert!(!out.contains("script"));
        assert!(!out.contains("onclick"));
    }

    #[test]
    fn field_error_only_for_flagged_fields() {
        let mut errors = FieldErrors::new();
        errors.add("title", "The title field is required");
        assert!(field_error(Some(&errors), "title").contains("class=\"error\""));
        assert_eq!(field_error(Some(&errors), "content"), "");
        assert_eq!(field_error(None, "title"), "");
    }

    #[test]
    fn banner_shows_flash_messages() {
        let html = flash_banner(&Flash::error("Nope"));
        assert!(html.contains("flash-error"));
        assert!(flash_banner(&Flash::new()).is_empty());
    }

    #[test]
    fn banner_escapes_flash_text() {
        let html = flash_banner(&Flash::success("<script>x()</script>"));
        assert!(!html.contains("<script>"));
    }
}
