pub mod admin;
pub mod auth;
pub mod bilingual;
pub mod health;
pub mod public;
pub mod sections;
pub mod translate;

use axum::Router;

use crate::state::AppState;

/// Build the HTML route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                                public page (?lang=)
/// /comments                                        submit comment (POST)
/// /contact                                         submit contact form (POST)
///
/// /login                                           form, sign in
/// /logout                                          sign out (POST)
///
/// /admin/sections                                  list, create (admin only)
/// /admin/sections/lesson                           lesson copy (POST)
/// /admin/sections/reorder                          reorder (POST, JSON)
/// /admin/sections/create                           create form
/// /admin/sections/{id}                             update (POST)
/// /admin/sections/{id}/edit                        edit form
/// /admin/sections/{id}/delete                      delete (POST)
///
/// /admin/bilingual                                 editor (admin + contributor)
/// /admin/bilingual/settings                        save source page copy (POST)
/// /admin/bilingual/translations                    save English text (POST)
/// /admin/bilingual/refresh                         machine suggestions (POST, JSON)
/// /admin/bilingual/sections                        create (POST)
/// /admin/bilingual/sections/{id}                   update (POST)
/// /admin/bilingual/sections/{id}/delete            delete (POST)
///
/// /admin/comments                                  moderation queue (admin only)
/// /admin/comments/{id}/approve                     approve (POST)
/// /admin/comments/{id}/delete                      delete (POST)
///
/// /admin/contacts                                  submissions (admin only)
/// /admin/contacts/{id}/delete                      delete (POST)
///
/// /admin/settings                                  welcome copy (admin only)
/// ```
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .merge(auth::router())
        .nest("/admin/sections", sections::router())
        .nest("/admin/bilingual", bilingual::router())
        .nest("/admin/comments", admin::comments_router())
        .nest("/admin/contacts", admin::contacts_router())
        .nest("/admin/settings", admin::settings_router())
}

/// Build the `/api/v1` route tree.
///
/// ```text
/// /translate/languages                             supported languages (GET)
/// /translate/page                                  public page (POST)
/// /translate/sections/{id}                         one section (POST, auth)
/// /translate/text                                  free text (POST, auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/translate", translate::router())
}
