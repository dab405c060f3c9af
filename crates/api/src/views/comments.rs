use renungan_db::models::comment::CommentWithSection;

use super::{admin_layout, esc};
use crate::flash::Flash;
use crate::middleware::auth::AuthUser;

pub fn list(
    user: &AuthUser,
    flash: &Flash,
    pending: &[CommentWithSection],
    approved: &[CommentWithSection],
) -> String {
    let mut body = format!("<h2>Pending ({})</h2>\n", pending.len());
    body.push_str(&table(pending, true));
    body.push_str(&format!("<h2>Approved ({})</h2>\n", approved.len()));
    body.push_str(&table(approved, false));
    admin_layout(user, "Comments", flash, &body)
}

fn table(comments: &[CommentWithSection], pending: bool) -> String {
    if comments.is_empty() {
        return "<p>None.</p>\n".to_string();
    }
    let mut out = String::from(
        "<table><thead><tr><th>Section</th><th>Author</th><th>Comment</th><th>Date</th>\
         <th></th></tr></thead><tbody>",
    );
    for c in comments {
        let approve = if pending {
            format!(
                "<form method=\"post\" action=\"/admin/comments/{}/approve\" style=\"display:inline\">\
                 <button type=\"submit\">Approve</button></form> ",
                c.id
            )
        } else {
            String::new()
        };
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}<br><small>{}</small></td><td>{}</td><td>{}</td>\
             <td>{approve}<form method=\"post\" action=\"/admin/comments/{}/delete\" \
             style=\"display:inline\"><button type=\"submit\">Delete</button></form></td></tr>",
            esc(&c.section_title),
            esc(&c.author_name),
            esc(&c.author_email),
            esc(&c.content),
            c.created_at.format("%Y-%m-%d %H:%M"),
            c.id,
        ));
    }
    out.push_str("</tbody></table>\n");
    out
}
