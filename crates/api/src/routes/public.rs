//! Route definitions for the public site.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// ```text
/// GET  /          -> index
/// POST /comments  -> store_comment
/// POST /contact   -> store_contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/comments", post(home::store_comment))
        .route("/contact", post(home::store_contact))
}
