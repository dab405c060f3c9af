//! `Cookie` request header parsing and `Set-Cookie` construction.
//!
//! Cookie values written here are always URL-safe tokens (UUIDs, hex), so
//! no percent-encoding is needed.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

/// Value of the cookie `name` from the request headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Build a `Set-Cookie` header value scoped to the whole site.
pub fn build_cookie(name: &str, value: &str, max_age_secs: Option<i64>, secure: bool) -> HeaderValue {
    let mut cookie = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax");
    if let Some(max_age) = max_age_secs {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// `Set-Cookie` value that deletes the cookie `name`.
pub fn expire_cookie(name: &str, secure: bool) -> HeaderValue {
    build_cookie(name, "", Some(0), secure)
}
