//! Route definitions for `/admin/bilingual`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bilingual;
use crate::state::AppState;

/// Routes mounted at `/admin/bilingual`. Admins and contributors.
///
/// ```text
/// GET  /                       -> index
/// POST /settings               -> update_settings
/// POST /translations           -> save_translations
/// POST /refresh                -> refresh
/// POST /sections               -> create_section
/// POST /sections/{id}          -> update_section
/// POST /sections/{id}/delete   -> delete_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bilingual::index))
        .route("/settings", post(bilingual::update_settings))
        .route("/translations", post(bilingual::save_translations))
        .route("/refresh", post(bilingual::refresh))
        .route("/sections", post(bilingual::create_section))
        .route("/sections/{id}", post(bilingual::update_section))
        .route("/sections/{id}/delete", post(bilingual::delete_section))
}
