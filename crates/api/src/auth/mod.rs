//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- Opaque session tokens and the session cookie.
//! - [`cookies`] -- Minimal `Cookie` / `Set-Cookie` header helpers.

pub mod cookies;
pub mod password;
pub mod session;
