//! Handlers for the public page and its two forms.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use renungan_core::comments::{validate_comment_form, CommentForm, CommentSubmission, COMMENT_THANKS};
use renungan_core::contact::{validate_contact_form, ContactForm, CONTACT_THANKS};
use renungan_core::language::{normalize_language_code, validate_language_code};
use renungan_core::settings::LESSON_IMAGE;
use renungan_core::types::DbId;
use renungan_db::models::comment::{Comment, CreateComment};
use renungan_db::models::contact_submission::CreateContactSubmission;
use renungan_db::repositories::{
    CommentRepo, ContactSubmissionRepo, SectionRepo, SettingRepo, UserRepo,
};
use renungan_notify::CommentNotification;
use serde::Deserialize;

use crate::error::PageResult;
use crate::flash::{
    back_url, Flash, IncomingFlash, COMMENT_ERROR, COMMENT_ERRORS, COMMENT_SUCCESS,
    CONTACT_ERRORS, CONTACT_SUCCESS,
};
use crate::localizer::{load_page_copy, Localizer};
use crate::state::AppState;
use crate::views;
use crate::views::home::HomePage;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub lang: Option<String>,
}

/// GET /
///
/// Published sections with approved comments, in `?lang=` (default: the
/// source language). Unknown language codes fall back to the source.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
    flash: IncomingFlash,
) -> PageResult<Response> {
    let lang = match query.lang.as_deref().map(normalize_language_code) {
        Some(code) if validate_language_code(&code).is_ok() => code,
        _ => state.source_language().to_string(),
    };

    let page_copy = load_page_copy(&state.pool).await?;
    let lesson_image = SettingRepo::get(&state.pool, LESSON_IMAGE, "").await?;
    let sections = SectionRepo::list_published(&state.pool).await?;

    let ids: Vec<DbId> = sections.iter().map(|s| s.id).collect();
    let mut comments: HashMap<DbId, Vec<Comment>> = HashMap::new();
    for comment in CommentRepo::list_approved_for_sections(&state.pool, &ids).await? {
        comments.entry(comment.section_id).or_default().push(comment);
    }

    let texts = Localizer::new(&state)
        .localize(&lang, &page_copy, &sections)
        .await?;

    let html = views::home::render(&HomePage {
        lang: &lang,
        texts: &texts,
        lesson_image: &lesson_image,
        sections: &sections,
        comments: &comments,
        flash: &flash.flash,
    });
    Ok(flash.render(html))
}

/// POST /comments
///
/// Stores the comment unapproved and emails the admins in the background.
/// A filled honeypot gets the normal thank-you but nothing is stored.
pub async fn store_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CommentForm>,
) -> PageResult<Response> {
    let back = back_url(&headers, "/");

    let input = match validate_comment_form(&form) {
        Ok(CommentSubmission::Accepted(input)) => input,
        Ok(CommentSubmission::Spam) => {
            tracing::info!("Discarded comment with filled honeypot");
            return Ok(Flash::new()
                .with_message(COMMENT_SUCCESS, COMMENT_THANKS)
                .redirect(&back));
        }
        Err(errors) => {
            return Ok(Flash::new()
                .with_errors(COMMENT_ERRORS, errors)
                .redirect(&back));
        }
    };

    let Some(section) = SectionRepo::find_published_by_id(&state.pool, input.section_id).await?
    else {
        return Ok(Flash::new()
            .with_message(COMMENT_ERROR, "Section not found")
            .redirect(&back));
    };

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            section_id: section.id,
            author_name: input.author_name,
            author_email: input.author_email,
            content: input.content,
        },
    )
    .await?;
    tracing::info!(comment_id = comment.id, section_id = section.id, "Comment submitted");

    notify_admins(
        &state,
        CommentNotification {
            section_title: section.title,
            author_name: comment.author_name,
            author_email: comment.author_email,
            content: comment.content,
        },
    );

    Ok(Flash::new()
        .with_message(COMMENT_SUCCESS, COMMENT_THANKS)
        .redirect(&back))
}

/// Email every admin about a new comment without holding up the visitor.
fn notify_admins(state: &AppState, notification: CommentNotification) {
    let Some(mailer) = state.mailer.clone() else {
        return;
    };
    let pool = state.pool.clone();
    tokio::spawn(async move {
        let admins = match UserRepo::list_admin_emails(&pool).await {
            Ok(admins) => admins,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load admin emails");
                return;
            }
        };
        match mailer.notify_admins(&admins, &notification).await {
            Ok(sent) => tracing::info!(recipients = sent, "Comment notification sent"),
            Err(e) => tracing::error!(error = %e, "Failed to send comment notification"),
        }
    });
}

/// POST /contact
pub async fn store_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> PageResult<Response> {
    let back = back_url(&headers, "/");

    let input = match validate_contact_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            return Ok(Flash::new()
                .with_errors(CONTACT_ERRORS, errors)
                .redirect(&back));
        }
    };

    let submission = ContactSubmissionRepo::create(
        &state.pool,
        &CreateContactSubmission {
            first_name: input.first_name,
            last_name: input.last_name,
            town: input.town,
            email: input.email,
            want_follow_jesus: input.want_follow_jesus,
            want_bible: input.want_bible,
            want_prayer_request: input.want_prayer_request,
            want_ask_question: input.want_ask_question,
            message: input.message,
        },
    )
    .await?;
    tracing::info!(submission_id = submission.id, "Contact form submitted");

    Ok(Flash::new()
        .with_message(CONTACT_SUCCESS, CONTACT_THANKS)
        .redirect(&back))
}
