//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use renungan_core::error::CoreError;
use renungan_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use super::wants_json;
use crate::error::AppError;
use crate::flash::Flash;
use crate::state::AppState;

/// Shown to contributors who open an admin-only page.
pub const PERMISSION_DENIED: &str = "You do not have permission to access that page";

/// Where contributors land; the only admin page they may use.
pub const CONTRIBUTOR_HOME: &str = "/admin/bilingual";

/// Requires the `admin` role.
///
/// Contributors are sent to the bilingual editor with an error flash; JSON
/// requests get 403.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> PageResult<Response> {
///     // user is guaranteed to be an admin here
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            tracing::info!(user_id = user.user_id, path = %parts.uri.path(), "Admin page denied");
            if wants_json(parts) {
                return Err(
                    AppError::Core(CoreError::Forbidden("Admin role required".into()))
                        .into_response(),
                );
            }
            return Err(Flash::error(PERMISSION_DENIED).redirect(CONTRIBUTOR_HOME));
        }
        Ok(RequireAdmin(user))
    }
}
