//! Opaque session tokens.
//!
//! The browser holds a random token in the session cookie; only its SHA-256
//! hash is stored in `user_sessions`, so a database leak does not expose
//! live sessions.

use axum::http::HeaderValue;
use renungan_core::hashing::sha256_hex;
use uuid::Uuid;

use super::cookies::{build_cookie, expire_cookie};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "renungan_session";

/// Generate a session token.
///
/// Returns `(plaintext, sha256_hex_hash)`. The plaintext goes into the
/// cookie; the hash is persisted.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}

/// `Set-Cookie` value that stores `token` for `ttl_hours`.
pub fn session_cookie(token: &str, ttl_hours: i64, secure: bool) -> HeaderValue {
    build_cookie(SESSION_COOKIE, token, Some(ttl_hours * 3600), secure)
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    expire_cookie(SESSION_COOKIE, secure)
}
