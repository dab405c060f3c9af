//! Public devotional page.

use std::collections::HashMap;

use renungan_core::language::SUPPORTED_LANGUAGES;
use renungan_core::localization::{section_key, SectionField, TranslationMap};
use renungan_core::settings::{
    ABOUT_US_CONTENT, ABOUT_US_TITLE, LESSON_INTRODUCTION, LESSON_TITLE, WELCOME_SUBTITLE,
    WELCOME_TITLE,
};
use renungan_core::types::DbId;
use renungan_db::models::comment::Comment;
use renungan_db::models::section::Section;

use super::{esc, field_error, layout, rich};
use crate::flash::{
    Flash, COMMENT_ERROR, COMMENT_ERRORS, COMMENT_SUCCESS, CONTACT_ERRORS, CONTACT_SUCCESS,
};

pub struct HomePage<'a> {
    pub lang: &'a str,
    pub texts: &'a TranslationMap,
    pub lesson_image: &'a str,
    pub sections: &'a [Section],
    pub comments: &'a HashMap<DbId, Vec<Comment>>,
    pub flash: &'a Flash,
}

pub fn render(page: &HomePage<'_>) -> String {
    let t = page.texts;
    let mut body = String::from("<main>\n");
    body.push_str(&language_picker(page.lang));

    body.push_str(&format!("<header><h1>{}</h1>", esc(t.get(WELCOME_TITLE))));
    if !t.get(WELCOME_SUBTITLE).is_empty() {
        body.push_str(&format!("<p>{}</p>", rich(t.get(WELCOME_SUBTITLE))));
    }
    body.push_str("</header>\n");

    if !t.get(LESSON_TITLE).is_empty() || !t.get(LESSON_INTRODUCTION).is_empty() {
        body.push_str("<section class=\"lesson\">");
        if !t.get(LESSON_TITLE).is_empty() {
            body.push_str(&format!("<h2>{}</h2>", esc(t.get(LESSON_TITLE))));
        }
        if !page.lesson_image.is_empty() {
            body.push_str(&format!(
                "<img src=\"{}\" alt=\"\" style=\"max-width:100%\">",
                esc(page.lesson_image)
            ));
        }
        body.push_str(&rich(t.get(LESSON_INTRODUCTION)));
        body.push_str("</section>\n");
    }

    for message in [
        page.flash.message(COMMENT_SUCCESS).map(|m| ("flash-success", m)),
        page.flash.message(COMMENT_ERROR).map(|m| ("flash-error", m)),
    ]
    .into_iter()
    .flatten()
    {
        body.push_str(&format!("<p class=\"{}\">{}</p>\n", message.0, esc(message.1)));
    }

    for section in page.sections {
        let no_comments = Vec::new();
        let comments = page.comments.get(&section.id).unwrap_or(&no_comments);
        body.push_str(&section_panel(section, t, comments, page.flash));
    }

    if !t.get(ABOUT_US_TITLE).is_empty() || !t.get(ABOUT_US_CONTENT).is_empty() {
        body.push_str(&format!(
            "<section class=\"about\"><h2>{}</h2>{}</section>\n",
            esc(t.get(ABOUT_US_TITLE)),
            rich(t.get(ABOUT_US_CONTENT))
        ));
    }

    body.push_str(&contact_form(page.flash));
    body.push_str("</main>");
    layout(t.get(WELCOME_TITLE), page.lang, &body)
}

fn language_picker(current: &str) -> String {
    let options: String = SUPPORTED_LANGUAGES
        .iter()
        .map(|l| {
            let selected = if l.code == current { " selected" } else { "" };
            format!("<option value=\"{}\"{selected}>{}</option>", l.code, esc(l.name))
        })
        .collect();
    format!(
        "<form method=\"get\" action=\"/\" class=\"lang\"><select name=\"lang\">{options}</select> \
         <button type=\"submit\">Go</button></form>\n"
    )
}

fn section_panel(
    section: &Section,
    t: &TranslationMap,
    comments: &[Comment],
    flash: &Flash,
) -> String {
    let text = |field| t.get(&section_key(section.id, field)).to_string();
    let mut out = format!(
        "<details id=\"section-{id}\"><summary>{}</summary>\n",
        esc(&text(SectionField::Title)),
        id = section.id
    );
    if let Some(url) = section.image_url.as_deref() {
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"\" style=\"max-width:100%\">",
            esc(url)
        ));
    }
    out.push_str(&format!(
        "<div class=\"content\">{}</div>\n",
        rich(&text(SectionField::Content))
    ));

    let questions: Vec<String> = [
        SectionField::Question1,
        SectionField::Question2,
        SectionField::Question3,
    ]
    .into_iter()
    .map(text)
    .filter(|q| !q.trim().is_empty())
    .collect();
    if !questions.is_empty() {
        out.push_str("<ol class=\"questions\">");
        for q in &questions {
            out.push_str(&format!("<li>{}</li>", rich(q)));
        }
        out.push_str("</ol>\n");
    }

    out.push_str("<div class=\"comments\">");
    for c in comments {
        out.push_str(&format!(
            "<blockquote><p>{}</p><footer>{} &middot; {}</footer></blockquote>",
            esc(&c.content),
            esc(&c.author_name),
            c.created_at.format("%Y-%m-%d"),
        ));
    }
    out.push_str("</div>\n");
    out.push_str(&comment_form(section.id, flash));
    out.push_str("</details>\n");
    out
}

fn comment_form(section_id: DbId, flash: &Flash) -> String {
    let errors = flash.errors(COMMENT_ERRORS);
    format!(
        "<form method=\"post\" action=\"/comments\" class=\"comment-form\">\
         <input type=\"hidden\" name=\"section_id\" value=\"{section_id}\">\
         <label>Name <input type=\"text\" name=\"author_name\" maxlength=\"100\" required></label>{}\
         <label>Email <input type=\"email\" name=\"author_email\" required></label>{}\
         <label>Comment <textarea name=\"content\" maxlength=\"2000\" required></textarea></label>{}\
         <div style=\"display:none\"><label>Website <input type=\"text\" name=\"website\" \
         tabindex=\"-1\" autocomplete=\"off\"></label></div>\
         <button type=\"submit\">Submit comment</button></form>\n",
        field_error(errors, "author_name"),
        field_error(errors, "author_email"),
        field_error(errors, "content"),
    )
}

fn contact_form(flash: &Flash) -> String {
    let errors = flash.errors(CONTACT_ERRORS);
    let mut out = String::from("<section id=\"contact\"><h2>Contact</h2>\n");
    if let Some(msg) = flash.message(CONTACT_SUCCESS) {
        out.push_str(&format!("<p class=\"flash-success\">{}</p>", esc(msg)));
    }
    out.push_str(&format!(
        "<form method=\"post\" action=\"/contact\">\
         <label>First name <input type=\"text\" name=\"first_name\" maxlength=\"100\" required></label>{}\
         <label>Last name <input type=\"text\" name=\"last_name\" maxlength=\"100\"></label>{}\
         <label>Town <input type=\"text\" name=\"town\" maxlength=\"100\" required></label>{}\
         <label>Email <input type=\"email\" name=\"email\" required></label>{}\
         <label><input type=\"checkbox\" name=\"want_follow_jesus\"> I want to follow Jesus</label>\
         <label><input type=\"checkbox\" name=\"want_bible\"> I would like a Bible</label>\
         <label><input type=\"checkbox\" name=\"want_prayer_request\"> I have a prayer request</label>\
         <label><input type=\"checkbox\" name=\"want_ask_question\"> I have a question</label>\
         <label>Message <textarea name=\"message\"></textarea></label>\
         <button type=\"submit\">Send</button></form></section>\n",
        field_error(errors, "first_name"),
        field_error(errors, "last_name"),
        field_error(errors, "town"),
        field_error(errors, "email"),
    ));
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn section(id: DbId) -> Section {
        Section {
            id,
            title: "Judul".into(),
            content: "<p>Isi</p>".into(),
            reflective_question: Some("Mengapa?".into()),
            reflective_question_2: None,
            reflective_question_3: None,
            image_url: None,
            display_order: 0,
            is_published: true,
            title_id: None,
            content_id: None,
            reflective_question_id: None,
            reflective_question_2_id: None,
            reflective_question_3_id: None,
            title_en: None,
            content_en: None,
            reflective_question_en: None,
            reflective_question_2_en: None,
            reflective_question_3_en: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn renders_localized_text_and_escapes_comments() {
        let mut texts = TranslationMap::new();
        texts.insert(WELCOME_TITLE, "Welcome");
        texts.insert(section_key(3, SectionField::Title), "Title");
        texts.insert(section_key(3, SectionField::Content), "<p>Body</p>");
        texts.insert(section_key(3, SectionField::Question1), "Why?");

        let mut comments = HashMap::new();
        comments.insert(
            3,
            vec![Comment {
                id: 1,
                section_id: 3,
                author_name: "Ruth".into(),
                author_email: "ruth@example.com".into(),
                content: "<b>hi</b>".into(),
                is_approved: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }],
        );
        let sections = [section(3)];
        let flash = Flash::new();
        let html = render(&HomePage {
            lang: "en",
            texts: &texts,
            lesson_image: "",
            sections: &sections,
            comments: &comments,
            flash: &flash,
        });

        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("section-3"));
        assert!(!html.contains("<b>hi</b>"));
        assert!(html.contains("name=\"website\""));
        assert!(html.contains("<option value=\"en\" selected>"));
    }
}
