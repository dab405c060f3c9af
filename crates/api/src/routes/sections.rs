//! Route definitions for `/admin/sections`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sections;
use crate::state::AppState;

/// Routes mounted at `/admin/sections`. All require the admin role.
///
/// ```text
/// GET  /               -> index
/// POST /               -> store
/// POST /lesson         -> update_lesson
/// POST /reorder        -> reorder
/// GET  /create         -> create
/// POST /{id}           -> update
/// GET  /{id}/edit      -> edit
/// POST /{id}/delete    -> destroy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sections::index).post(sections::store))
        .route("/lesson", post(sections::update_lesson))
        .route("/reorder", post(sections::reorder))
        .route("/create", get(sections::create))
        .route("/{id}", post(sections::update))
        .route("/{id}/edit", get(sections::edit))
        .route("/{id}/delete", post(sections::destroy))
}
