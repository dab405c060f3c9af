//! Public comment validation and moderation messages.

use serde::Deserialize;

use crate::types::DbId;
use crate::validation::{email, optional_text, required_text, FieldErrors};

/// Maximum length of a comment author name.
pub const MAX_AUTHOR_NAME_LENGTH: usize = 100;

/// Maximum length of a comment body.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Shown after every accepted submission, including silently dropped spam.
pub const COMMENT_THANKS: &str =
    "Thank you for your comment! It will be visible after approval.";

/// Raw comment form from the public page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    pub section_id: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub content: Option<String>,
    /// Honeypot. Hidden from humans, so anything here came from a bot.
    pub website: Option<String>,
}

/// Outcome of validating a comment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentSubmission {
    /// A real comment to store for moderation.
    Accepted(CommentInput),
    /// The honeypot was filled; pretend success and store nothing.
    Spam,
}

/// Validated comment, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentInput {
    pub section_id: DbId,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

/// Validate a submitted comment form.
pub fn validate_comment_form(form: &CommentForm) -> Result<CommentSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    let section_id = match form
        .section_id
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<DbId>().ok())
    {
        Some(id) if id > 0 => id,
        _ => {
            errors.add("section_id", "The section id field must be a positive number");
            0
        }
    };
    let author_name = required_text(
        &mut errors,
        "author_name",
        form.author_name.as_deref(),
        1,
        Some(MAX_AUTHOR_NAME_LENGTH),
    );
    let author_email = email(&mut errors, "author_email", form.author_email.as_deref());
    let content = required_text(
        &mut errors,
        "content",
        form.content.as_deref(),
        1,
        Some(MAX_COMMENT_LENGTH),
    );
    let website = optional_text(&mut errors, "website", form.website.as_deref(), None);

    if website.is_some() {
        return Ok(CommentSubmission::Spam);
    }

    errors.into_result(CommentSubmission::Accepted(CommentInput {
        section_id,
        author_name,
        author_email,
        content,
    }))
}
