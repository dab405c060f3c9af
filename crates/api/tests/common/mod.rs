#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use renungan_api::auth::password::hash_password;
use renungan_api::auth::session::SESSION_COOKIE;
use renungan_api::config::ServerConfig;
use renungan_api::flash::{Flash, FLASH_COOKIE};
use renungan_api::router::build_app_router;
use renungan_api::state::AppState;
use renungan_core::roles::{ROLE_ADMIN, ROLE_CONTRIBUTOR};
use renungan_db::models::user::CreateUser;
use renungan_db::repositories::UserRepo;
use renungan_translate::{TranslateError, Translator};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const CONTRIBUTOR_EMAIL: &str = "contributor@example.com";
pub const PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Content is authored in Indonesian, as in production.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        session_ttl_hours: 2,
        cookie_secure: false,
        source_language: "id".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fake translator
// ---------------------------------------------------------------------------

/// Translator that prefixes every text with `[lang]`, or fails every
/// non-empty call.
#[derive(Debug, Default)]
pub struct FakeTranslator {
    pub fail: bool,
}

impl FakeTranslator {
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate_many(
        &self,
        texts: &[String],
        target: &str,
        _source: &str,
    ) -> Result<Vec<String>, TranslateError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if self.fail {
            return Err(TranslateError::ApiError {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(texts.iter().map(|t| format!("[{target}]{t}")).collect())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with a working fake translator.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(FakeTranslator::default()))
}

/// Build the full application router with the given translator.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack. Email is left unconfigured.
pub fn build_test_app_with(pool: PgPool, translator: Arc<dyn Translator>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        translator,
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a GET, optionally with a `Cookie` header.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a URL-encoded form POST.
pub async fn post_form(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Send a JSON POST.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Percent-encode a form component.
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Assert a 303 redirect and return its target.
pub fn redirect_target(response: &Response) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(LOCATION)
        .expect("redirect has a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// `name=value` pair of the cookie `name` set by the response.
pub fn set_cookie(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with(&prefix))
        .filter_map(|v| v.split(';').next())
        .map(str::to_string)
        .next()
}

/// The flash messages carried by a redirect.
pub fn flash_of(response: &Response) -> Flash {
    let pair = set_cookie(response, FLASH_COOKIE).expect("response sets a flash cookie");
    let value = pair.trim_start_matches(&format!("{FLASH_COOKIE}="));
    Flash::decode(value).expect("flash cookie decodes")
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, email: &str, role: &str) {
    UserRepo::create(
        pool,
        &CreateUser {
            full_name: Some("Test User".to_string()),
            email: email.to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
}

/// Sign in through `POST /login` and return the session `Cookie` value.
pub async fn login_cookie(app: &Router, email: &str) -> String {
    let response = post_form(app, "/login", &[("email", email), ("password", PASSWORD)], None).await;
    set_cookie(&response, SESSION_COOKIE).expect("login sets the session cookie")
}

/// Create an admin and return a signed-in cookie.
pub async fn admin_cookie(app: &Router, pool: &PgPool) -> String {
    create_user(pool, ADMIN_EMAIL, ROLE_ADMIN).await;
    login_cookie(app, ADMIN_EMAIL).await
}

/// Create a contributor and return a signed-in cookie.
pub async fn contributor_cookie(app: &Router, pool: &PgPool) -> String {
    create_user(pool, CONTRIBUTOR_EMAIL, ROLE_CONTRIBUTOR).await;
    login_cookie(app, CONTRIBUTOR_EMAIL).await
}
