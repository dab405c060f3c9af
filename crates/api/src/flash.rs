//! One-shot flash messages carried across a redirect in a cookie.
//!
//! A handler that redirects attaches a [`Flash`]; the next page that renders
//! reads it through [`IncomingFlash`] and clears the cookie. The cookie value
//! is hex-encoded JSON so it never needs quoting. It is not signed, so a
//! client can set any message; views always render flash text escaped.

use std::collections::BTreeMap;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{REFERER, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use renungan_core::validation::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::auth::cookies::{build_cookie, expire_cookie, read_cookie};

pub const FLASH_COOKIE: &str = "renungan_flash";

pub const SUCCESS: &str = "success";
pub const ERROR: &str = "error";
pub const ERRORS: &str = "errors";
pub const COMMENT_SUCCESS: &str = "commentSuccess";
pub const COMMENT_ERROR: &str = "commentError";
pub const COMMENT_ERRORS: &str = "commentErrors";
pub const CONTACT_SUCCESS: &str = "contactSuccess";
pub const CONTACT_ERRORS: &str = "contactErrors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlashValue {
    Message(String),
    Errors(FieldErrors),
}

/// Messages keyed by purpose (`success`, `commentErrors`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash(BTreeMap<String, FlashValue>);

impl Flash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new().with_message(SUCCESS, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new().with_message(ERROR, message)
    }

    pub fn with_message(mut self, key: &str, message: impl Into<String>) -> Self {
        self.0
            .insert(key.to_string(), FlashValue::Message(message.into()));
        self
    }

    pub fn with_errors(mut self, key: &str, errors: FieldErrors) -> Self {
        self.0.insert(key.to_string(), FlashValue::Errors(errors));
        self
    }

    pub fn message(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(FlashValue::Message(m)) => Some(m),
            _ => None,
        }
    }

    pub fn errors(&self, key: &str) -> Option<&FieldErrors> {
        match self.0.get(key) {
            Some(FlashValue::Errors(e)) => Some(e),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn encode(&self) -> String {
        hex::encode(serde_json::to_vec(self).unwrap_or_default())
    }

    /// Decode a cookie value. Values that are not hex-encoded flash JSON
    /// decode to `None`; any well-formed value is accepted as-is.
    pub fn decode(value: &str) -> Option<Self> {
        let bytes = hex::decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Redirect (303) to `to`, carrying these messages.
    pub fn redirect(self, to: &str) -> Response {
        let cookie = build_cookie(FLASH_COOKIE, &self.encode(), None, false);
        ([(SET_COOKIE, cookie)], Redirect::to(to)).into_response()
    }
}

/// Flash messages left by the previous request.
#[derive(Debug, Clone, Default)]
pub struct IncomingFlash {
    pub flash: Flash,
    present: bool,
}

impl IncomingFlash {
    /// Render a page, consuming the flash cookie if one was sent.
    pub fn render(self, html: String) -> Response {
        if self.present {
            ([(SET_COOKIE, expire_cookie(FLASH_COOKIE, false))], Html(html)).into_response()
        } else {
            Html(html).into_response()
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for IncomingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = read_cookie(&parts.headers, FLASH_COOKIE) else {
            return Ok(Self::default());
        };
        Ok(Self {
            flash: Flash::decode(&raw).unwrap_or_default(),
            present: true,
        })
    }
}

/// Same-site path to return to after a form post: the path and query of the
/// `Referer` header, or `fallback`.
pub fn back_url(headers: &HeaderMap, fallback: &str) -> String {
    let Some(referer) = headers.get(REFERER).and_then(|v| v.to_str().ok()) else {
        return fallback.to_string();
    };
    if referer.starts_with('/') && !referer.starts_with("//") {
        return referer.to_string();
    }
    referer
        .split_once("://")
        .and_then(|(_, rest)| rest.find('/').map(|i| rest[i..].to_string()))
        .unwrap_or_else(|| fallback.to_string())
}
