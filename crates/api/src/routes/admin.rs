//! Route definitions for the admin-only moderation and settings pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comments, contacts, settings};
use crate::state::AppState;

/// Routes mounted at `/admin/comments`.
///
/// ```text
/// GET  /                -> index
/// POST /{id}/approve    -> approve
/// POST /{id}/delete     -> destroy
/// ```
pub fn comments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(comments::index))
        .route("/{id}/approve", post(comments::approve))
        .route("/{id}/delete", post(comments::destroy))
}

/// Routes mounted at `/admin/contacts`.
///
/// ```text
/// GET  /                -> index
/// POST /{id}/delete     -> destroy
/// ```
pub fn contacts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(contacts::index))
        .route("/{id}/delete", post(contacts::destroy))
}

/// Routes mounted at `/admin/settings`.
///
/// ```text
/// GET  /   -> edit
/// POST /   -> update
/// ```
pub fn settings_router() -> Router<AppState> {
    Router::new().route("/", get(settings::edit).post(settings::update))
}
