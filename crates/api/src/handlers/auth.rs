//! Handlers for login and logout.

use axum::extract::State;
use axum::http::header::{SET_COOKIE, USER_AGENT};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use chrono::{Duration, Utc};
use renungan_core::roles::ROLE_ADMIN;
use renungan_db::models::session::CreateSession;
use renungan_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::auth::session::{clear_session_cookie, generate_session_token, session_cookie};
use crate::error::{AppError, PageResult};
use crate::flash::{Flash, IncomingFlash};
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::middleware::rbac::CONTRIBUTOR_HOME;
use crate::state::AppState;
use crate::views;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Landing page after login for a role.
pub fn home_for(role: &str) -> &'static str {
    if role == ROLE_ADMIN {
        "/admin/sections"
    } else {
        CONTRIBUTOR_HOME
    }
}

/// GET /login
pub async fn show_login(MaybeUser(user): MaybeUser, flash: IncomingFlash) -> Response {
    if let Some(user) = user {
        return Redirect::to(home_for(&user.role)).into_response();
    }
    let html = views::login::render(&flash.flash);
    flash.render(html)
}

/// POST /login
///
/// Verifies the password, records a session and sets the session cookie.
/// Unknown emails and wrong passwords get the same message.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    let email = form.email.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    let Some(user) = UserRepo::find_by_email(&state.pool, email.trim()).await? else {
        tracing::info!("Login failed: unknown email");
        return Ok(Flash::error(INVALID_CREDENTIALS).redirect("/login"));
    };

    let valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Ok(Flash::error(INVALID_CREDENTIALS).redirect("/login"));
    }

    let (token, token_hash) = generate_session_token();
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_hash,
            expires_at: Utc::now() + Duration::hours(state.config.session_ttl_hours),
            user_agent,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    let cookie = session_cookie(
        &token,
        state.config.session_ttl_hours,
        state.config.cookie_secure,
    );
    Ok(([(SET_COOKIE, cookie)], Redirect::to(home_for(&user.role))).into_response())
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> PageResult<Response> {
    SessionRepo::revoke(&state.pool, user.session_id).await?;
    tracing::info!(user_id = user.user_id, "User logged out");

    let cookie = clear_session_cookie(state.config.cookie_secure);
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/login")).into_response())
}
