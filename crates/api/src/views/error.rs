use axum::http::StatusCode;

use super::{esc, layout};

/// Error page for HTML routes.
pub fn render(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<main>\n<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to home</a></p>\n</main>",
        status.as_u16(),
        esc(reason),
        esc(message),
    );
    layout(reason, "en", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_status_and_message() {
        let html = render(StatusCode::NOT_FOUND, "Section with id 4 not found");
        assert!(html.contains("404"));
        assert!(html.contains(&esc("Section with id 4 not found")));
    }
}
