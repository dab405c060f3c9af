//! Section form validation.

use serde::Deserialize;

use crate::validation::{checkbox, optional_text, required_text, FieldErrors};

/// Raw section form as posted by the admin editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub reflective_question: Option<String>,
    pub reflective_question_2: Option<String>,
    pub reflective_question_3: Option<String>,
    pub image_url: Option<String>,
    pub display_order: Option<String>,
    pub is_published: Option<String>,
}

/// Validated section content, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInput {
    pub title: String,
    pub content: String,
    pub reflective_question: Option<String>,
    pub reflective_question_2: Option<String>,
    pub reflective_question_3: Option<String>,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_published: bool,
}

/// Validate a submitted section form.
pub fn validate_section_form(form: &SectionForm) -> Result<SectionInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = required_text(&mut errors, "title", form.title.as_deref(), 1, None);
    let content = required_text(&mut errors, "content", form.content.as_deref(), 1, None);
    let reflective_question = optional_text(
        &mut errors,
        "reflective_question",
        form.reflective_question.as_deref(),
        None,
    );
    let reflective_question_2 = optional_text(
        &mut errors,
        "reflective_question_2",
        form.reflective_question_2.as_deref(),
        None,
    );
    let reflective_question_3 = optional_text(
        &mut errors,
        "reflective_question_3",
        form.reflective_question_3.as_deref(),
        None,
    );
    let image_url = optional_text(&mut errors, "image_url", form.image_url.as_deref(), None);

    let display_order = match form.display_order.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<i32>() {
            Ok(n) if n >= 0 => Some(n),
            Ok(_) => {
                errors.add("display_order", "The display order field must be at least 0");
                None
            }
            Err(_) => {
                errors.add("display_order", "The display order field must be a number");
                None
            }
        },
    };

    errors.into_result(SectionInput {
        title,
        content,
        reflective_question,
        reflective_question_2,
        reflective_question_3,
        image_url,
        display_order,
        is_published: checkbox(form.is_published.as_deref()),
    })
}

/// Display order for a section appended after `current_max`.
///
/// `empty_start` is the order given to the first section of an empty list.
pub fn next_display_order(current_max: Option<i32>, empty_start: i32) -> i32 {
    match current_max {
        Some(max) => max + 1,
        None => empty_start,
    }
}
