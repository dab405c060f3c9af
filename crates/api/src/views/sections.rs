//! Admin section list and editor.

use std::collections::BTreeMap;

use renungan_core::settings::{LESSON_IMAGE, LESSON_INTRODUCTION, LESSON_TITLE};
use renungan_db::models::section::Section;

use super::{admin_layout, checked, esc, field_error};
use crate::flash::{Flash, ERRORS};
use crate::middleware::auth::AuthUser;

pub fn list(
    user: &AuthUser,
    flash: &Flash,
    sections: &[Section],
    lesson: &BTreeMap<String, String>,
) -> String {
    let value = |key: &str| esc(lesson.get(key).map(String::as_str).unwrap_or(""));
    let mut body = format!(
        "<h2>Lesson</h2>\n<form method=\"post\" action=\"/admin/sections/lesson\">\
         <label>Lesson title <input type=\"text\" name=\"lesson_title\" value=\"{}\"></label>\
         <label>Lesson introduction <textarea name=\"lesson_introduction\">{}</textarea></label>\
         <label>Lesson image URL <input type=\"url\" name=\"lesson_image\" value=\"{}\"></label>\
         <button type=\"submit\">Save lesson</button></form>\n",
        value(LESSON_TITLE),
        value(LESSON_INTRODUCTION),
        value(LESSON_IMAGE),
    );

    body.push_str("<h2>Sections</h2>\n<p><a href=\"/admin/sections/create\">New section</a></p>\n");
    if sections.is_empty() {
        body.push_str("<p>No sections yet.</p>\n");
    } else {
        body.push_str(
            "<table id=\"sections\"><thead><tr><th>Order</th><th>Title</th><th>Status</th>\
             <th></th></tr></thead><tbody>",
        );
        for s in sections {
            body.push_str(&format!(
                "<tr data-id=\"{id}\"><td>{order}</td><td>{title}</td><td>{status}</td>\
                 <td><a href=\"/admin/sections/{id}/edit\">Edit</a> \
                 <form method=\"post\" action=\"/admin/sections/{id}/delete\" style=\"display:inline\">\
                 <button type=\"submit\">Delete</button></form></td></tr>",
                id = s.id,
                order = s.display_order,
                title = esc(&s.title),
                status = if s.is_published { "Published" } else { "Draft" },
            ));
        }
        body.push_str("</tbody></table>\n");
    }
    admin_layout(user, "Sections", flash, &body)
}

/// Create form when `section` is `None`, edit form otherwise.
pub fn form(user: &AuthUser, flash: &Flash, section: Option<&Section>) -> String {
    let errors = flash.errors(ERRORS);
    let text = |v: Option<&str>| esc(v.unwrap_or(""));
    let (action, heading) = match section {
        Some(s) => (format!("/admin/sections/{}", s.id), "Edit Section"),
        None => ("/admin/sections".to_string(), "New Section"),
    };
    let title = text(section.map(|s| s.title.as_str()));
    let content = text(section.map(|s| s.content.as_str()));
    let q1 = text(section.and_then(|s| s.reflective_question.as_deref()));
    let q2 = text(section.and_then(|s| s.reflective_question_2.as_deref()));
    let q3 = text(section.and_then(|s| s.reflective_question_3.as_deref()));
    let image = text(section.and_then(|s| s.image_url.as_deref()));
    let published = checked(section.is_some_and(|s| s.is_published));

    let body = format!(
        "<form method=\"post\" action=\"{action}\">\
         <label>Title <input type=\"text\" name=\"title\" value=\"{title}\" required></label>{}\
         <label>Content <textarea name=\"content\" required>{content}</textarea></label>{}\
         <label>Reflective question <textarea name=\"reflective_question\">{q1}</textarea></label>\
         <label>Reflective question 2 <textarea name=\"reflective_question_2\">{q2}</textarea></label>\
         <label>Reflective question 3 <textarea name=\"reflective_question_3\">{q3}</textarea></label>\
         <label>Image URL <input type=\"url\" name=\"image_url\" value=\"{image}\"></label>\
         <label><input type=\"checkbox\" name=\"is_published\"{published}> Published</label>{}\
         <button type=\"submit\">Save</button> <a href=\"/admin/sections\">Cancel</a></form>",
        field_error(errors, "title"),
        field_error(errors, "content"),
        field_error(errors, "display_order"),
    );
    admin_layout(user, heading, flash, &body)
}
