use renungan_db::models::contact_submission::ContactSubmission;

use super::{admin_layout, esc};
use crate::flash::Flash;
use crate::middleware::auth::AuthUser;

pub fn list(user: &AuthUser, flash: &Flash, submissions: &[ContactSubmission]) -> String {
    if submissions.is_empty() {
        return admin_layout(user, "Contact Submissions", flash, "<p>No submissions yet.</p>");
    }
    let mut body = String::from(
        "<table><thead><tr><th>Name</th><th>Town</th><th>Email</th><th>Interests</th>\
         <th>Message</th><th>Date</th><th></th></tr></thead><tbody>",
    );
    for s in submissions {
        let name = match &s.last_name {
            Some(last) => format!("{} {last}", s.first_name),
            None => s.first_name.clone(),
        };
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><form method=\"post\" action=\"/admin/contacts/{}/delete\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            esc(&name),
            esc(&s.town),
            esc(&s.email),
            esc(&interests(s).join(", ")),
            esc(s.message.as_deref().unwrap_or("")),
            s.created_at.format("%Y-%m-%d %H:%M"),
            s.id,
        ));
    }
    body.push_str("</tbody></table>");
    admin_layout(user, "Contact Submissions", flash, &body)
}

fn interests(s: &ContactSubmission) -> Vec<&'static str> {
    [
        (s.want_follow_jesus, "Follow Jesus"),
        (s.want_bible, "Bible"),
        (s.want_prayer_request, "Prayer request"),
        (s.want_ask_question, "Question"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect()
}
