//! Route definitions for the `/translate` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::translation;
use crate::state::AppState;

/// Routes mounted at `/api/v1/translate`.
///
/// ```text
/// GET  /languages        -> languages
/// POST /page             -> translate_page
/// POST /sections/{id}    -> translate_section (requires auth)
/// POST /text             -> translate_text (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/languages", get(translation::languages))
        .route("/page", post(translation::translate_page))
        .route("/sections/{id}", post(translation::translate_section))
        .route("/text", post(translation::translate_text))
}
