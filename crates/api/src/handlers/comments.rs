//! Admin comment moderation.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use renungan_core::error::CoreError;
use renungan_core::types::DbId;
use renungan_db::repositories::CommentRepo;

use crate::error::PageResult;
use crate::flash::{back_url, Flash, IncomingFlash};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::views;

const INDEX: &str = "/admin/comments";

/// GET /admin/comments
pub async fn index(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> PageResult<Response> {
    let pending = CommentRepo::list_by_status(&state.pool, false).await?;
    let approved = CommentRepo::list_by_status(&state.pool, true).await?;
    let html = views::comments::list(&user, &flash.flash, &pending, &approved);
    Ok(flash.render(html))
}

/// POST /admin/comments/{id}/approve
pub async fn approve(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> PageResult<Response> {
    if !CommentRepo::approve(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Comment", id }.into());
    }
    tracing::info!(user_id = user.user_id, comment_id = id, "Comment approved");
    Ok(Flash::success("Comment approved successfully").redirect(&back_url(&headers, INDEX)))
}

/// POST /admin/comments/{id}/delete
pub async fn destroy(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> PageResult<Response> {
    if !CommentRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Comment", id }.into());
    }
    tracing::info!(user_id = user.user_id, comment_id = id, "Comment deleted");
    Ok(Flash::success("Comment deleted successfully").redirect(&back_url(&headers, INDEX)))
}
