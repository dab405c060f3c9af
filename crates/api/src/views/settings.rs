use renungan_core::settings::{WELCOME_SUBTITLE, WELCOME_TITLE};

use super::{admin_layout, esc};
use crate::flash::Flash;
use crate::middleware::auth::AuthUser;

pub fn form(user: &AuthUser, flash: &Flash, welcome_title: &str, welcome_subtitle: &str) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/admin/settings\">\
         <label>Welcome title <input type=\"text\" name=\"{WELCOME_TITLE}\" value=\"{}\"></label>\
         <label>Welcome subtitle <textarea name=\"{WELCOME_SUBTITLE}\">{}</textarea></label>\
         <button type=\"submit\">Save settings</button></form>",
        esc(welcome_title),
        esc(welcome_subtitle),
    );
    admin_layout(user, "Settings", flash, &body)
}
