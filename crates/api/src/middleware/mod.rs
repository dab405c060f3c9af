//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- The signed-in user, from the session cookie.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.

pub mod auth;
pub mod rbac;

use axum::extract::OriginalUri;
use axum::http::request::Parts;

/// Whether the request targets the JSON API rather than an HTML page.
///
/// Nested routers see a stripped URI, so the original one is checked first.
pub(crate) fn wants_json(parts: &Parts) -> bool {
    let path = match parts.extensions.get::<OriginalUri>() {
        Some(OriginalUri(uri)) => uri.path(),
        None => parts.uri.path(),
    };
    path.starts_with("/api/")
}
