//! Route definitions for login and logout.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET  /login   -> show_login
/// POST /login   -> login
/// POST /logout  -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::show_login).post(auth::login))
        .route("/logout", post(auth::logout))
}
