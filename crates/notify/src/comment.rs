//! "New comment pending approval" email.

/// Details of a freshly submitted comment, as shown to admins.
#[derive(Debug, Clone)]
pub struct CommentNotification {
    pub section_title: String,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

impl CommentNotification {
    pub const SUBJECT: &'static str = "New Comment Pending Approval - Reading God's Word";

    /// Render the HTML body. Every visitor-supplied field is escaped; line
    /// breaks in the comment become `<br>`.
    pub fn render_html(&self, app_url: &str) -> String {
        let esc = ammonia::clean_text;
        let content = self
            .content
            .lines()
            .map(esc)
            .collect::<Vec<_>>()
            .join("<br>");
        format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #2c3e50;">New Comment Requires Approval</h2>
  <p>A new comment has been submitted and requires your approval.</p>
  <div style="background: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p><strong>Section:</strong> {section}</p>
    <p><strong>Author:</strong> {author}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Comment:</strong></p>
    <div style="background: white; padding: 15px; border-left: 4px solid #667eea;">{content}</div>
  </div>
  <p><a href="{url}/admin/comments">Review Comments</a></p>
  <p style="color: #666; font-size: 12px;">This email was sent automatically. Please do not reply.</p>
</div>"#,
            section = esc(&self.section_title),
            author = esc(&self.author_name),
            email = esc(&self.author_email),
            url = app_url,
        )
    }
}
