//! Contact form validation.

use serde::Deserialize;

use crate::validation::{checkbox, email, optional_text, required_text, FieldErrors};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_TOWN_LENGTH: usize = 100;

pub const CONTACT_THANKS: &str = "Thank you for your message! We will be in touch soon.";

/// Raw contact form from the public page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub town: Option<String>,
    pub email: Option<String>,
    pub want_follow_jesus: Option<String>,
    pub want_bible: Option<String>,
    pub want_prayer_request: Option<String>,
    pub want_ask_question: Option<String>,
    pub message: Option<String>,
}

/// Validated contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: Option<String>,
    pub town: String,
    pub email: String,
    pub want_follow_jesus: bool,
    pub want_bible: bool,
    pub want_prayer_request: bool,
    pub want_ask_question: bool,
    pub message: Option<String>,
}

pub fn validate_contact_form(form: &ContactForm) -> Result<ContactInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let first_name = required_text(
        &mut errors,
        "first_name",
        form.first_name.as_deref(),
        1,
        Some(MAX_NAME_LENGTH),
    );
    let last_name = optional_text(
        &mut errors,
        "last_name",
        form.last_name.as_deref(),
        Some(MAX_NAME_LENGTH),
    );
    let town = required_text(
        &mut errors,
        "town",
        form.town.as_deref(),
        1,
        Some(MAX_TOWN_LENGTH),
    );
    let email = email(&mut errors, "email", form.email.as_deref());
    let message = optional_text(&mut errors, "message", form.message.as_deref(), None);

    errors.into_result(ContactInput {
        first_name,
        last_name,
        town,
        email,
        want_follow_jesus: checkbox(form.want_follow_jesus.as_deref()),
        want_bible: checkbox(form.want_bible.as_deref()),
        want_prayer_request: checkbox(form.want_prayer_request.as_deref()),
        want_ask_question: checkbox(form.want_ask_question.as_deref()),
        message,
    })
}
