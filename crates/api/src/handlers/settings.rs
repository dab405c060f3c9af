//! Admin settings page (welcome copy).

use axum::extract::State;
use axum::response::Response;
use axum::Form;
use renungan_core::settings::{default_for, WELCOME_SUBTITLE, WELCOME_TITLE};
use renungan_db::repositories::SettingRepo;
use serde::Deserialize;

use crate::error::PageResult;
use crate::flash::{Flash, IncomingFlash};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub welcome_title: Option<String>,
    pub welcome_subtitle: Option<String>,
}

/// GET /admin/settings
pub async fn edit(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> PageResult<Response> {
    let title = SettingRepo::get(&state.pool, WELCOME_TITLE, default_for(WELCOME_TITLE)).await?;
    let subtitle =
        SettingRepo::get(&state.pool, WELCOME_SUBTITLE, default_for(WELCOME_SUBTITLE)).await?;
    let html = views::settings::form(&user, &flash.flash, &title, &subtitle);
    Ok(flash.render(html))
}

/// POST /admin/settings
pub async fn update(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> PageResult<Response> {
    let title = form.welcome_title.unwrap_or_default();
    let subtitle = form.welcome_subtitle.unwrap_or_default();
    SettingRepo::set(&state.pool, WELCOME_TITLE, title.trim()).await?;
    SettingRepo::set(&state.pool, WELCOME_SUBTITLE, subtitle.trim()).await?;
    tracing::info!(user_id = user.user_id, "Welcome settings updated");
    Ok(Flash::success("Settings updated successfully").redirect("/admin/settings"))
}
