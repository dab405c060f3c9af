//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use renungan_core::error::CoreError;
use renungan_core::types::DbId;
use renungan_db::repositories::{SessionRepo, UserRepo};

use super::wants_json;
use crate::auth::cookies::read_cookie;
use crate::auth::session::{hash_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user, resolved from the session cookie.
///
/// Pages redirect anonymous visitors to `/login`; JSON endpoints answer 401.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> PageResult<Response> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub session_id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    /// `"admin"` or `"contributor"`.
    pub role: String,
}

impl AuthUser {
    /// Name shown in the admin header.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }

    /// Resolve the session cookie without rejecting anonymous requests.
    pub async fn from_parts_optional(
        parts: &Parts,
        state: &AppState,
    ) -> Result<Option<Self>, AppError> {
        let Some(token) = read_cookie(&parts.headers, SESSION_COOKIE) else {
            return Ok(None);
        };
        let hash = hash_session_token(&token);
        let Some(session) = SessionRepo::find_active_by_token_hash(&state.pool, &hash).await?
        else {
            return Ok(None);
        };
        let Some(user) = UserRepo::find_by_id(&state.pool, session.user_id).await? else {
            return Ok(None);
        };
        Ok(Some(AuthUser {
            user_id: user.id,
            session_id: session.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        }))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_parts_optional(parts, state).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) if wants_json(parts) => Err(AppError::Core(CoreError::Unauthorized(
                "Authentication required".into(),
            ))
            .into_response()),
            Ok(None) => Err(Redirect::to("/login").into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// The signed-in user if there is one; never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(AuthUser::from_parts_optional(parts, state).await?))
    }
}
