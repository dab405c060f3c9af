//! Admin view of contact form submissions.

use axum::extract::{Path, State};
use axum::response::Response;
use renungan_core::error::CoreError;
use renungan_core::types::DbId;
use renungan_db::repositories::ContactSubmissionRepo;

use crate::error::PageResult;
use crate::flash::{Flash, IncomingFlash};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::views;

/// GET /admin/contacts
pub async fn index(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> PageResult<Response> {
    let submissions = ContactSubmissionRepo::list(&state.pool).await?;
    let html = views::contacts::list(&user, &flash.flash, &submissions);
    Ok(flash.render(html))
}

/// POST /admin/contacts/{id}/delete
pub async fn destroy(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> PageResult<Response> {
    if !ContactSubmissionRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Contact submission",
            id,
        }
        .into());
    }
    tracing::info!(user_id = user.user_id, submission_id = id, "Contact submission deleted");
    Ok(Flash::success("Submission deleted successfully").redirect("/admin/contacts"))
}
