use super::{esc, layout};
use crate::flash::{Flash, ERROR, SUCCESS};

pub fn render(flash: &Flash) -> String {
    let mut body = String::from("<main style=\"max-width:420px\">\n<h1>Login</h1>\n");
    if let Some(msg) = flash.message(ERROR) {
        body.push_str(&format!("<p class=\"flash-error\">{}</p>\n", esc(msg)));
    }
    if let Some(msg) = flash.message(SUCCESS) {
        body.push_str(&format!("<p class=\"flash-success\">{}</p>\n", esc(msg)));
    }
    body.push_str(
        "<form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\" required autofocus></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Login</button>\n</form>\n</main>",
    );
    layout("Login", "en", &body)
}
