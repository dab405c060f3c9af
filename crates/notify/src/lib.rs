//! Email notifications for site administrators.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. Configuration is loaded
//! from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be
//! constructed.

pub mod comment;

pub use comment::CommentNotification;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@renungan.local";
const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Public base URL of the site, used for links in emails.
    pub app_url: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | yes      |                          |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_FROM`     | no       | `noreply@renungan.local` |
    /// | `SMTP_USER`     | no       |                          |
    /// | `SMTP_PASSWORD` | no       |                          |
    /// | `APP_URL`       | no       | `http://localhost:3000`  |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            app_url: std::env::var("APP_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_APP_URL.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends notification emails via SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Tell every admin about a comment awaiting approval.
    ///
    /// Returns the number of recipients; with no admins nothing is sent.
    pub async fn notify_admins(
        &self,
        admin_emails: &[String],
        notification: &CommentNotification,
    ) -> Result<usize, EmailError> {
        if admin_emails.is_empty() {
            tracing::warn!("No admin users found to notify about new comment");
            return Ok(0);
        }

        let mut builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .subject(CommentNotification::SUBJECT)
            .header(ContentType::TEXT_HTML);
        for to in admin_emails {
            builder = builder.to(to.parse()?);
        }
        let email = builder
            .body(notification.render_html(&self.config.app_url))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(
            recipients = admin_emails.len(),
            section = %notification.section_title,
            "Comment notification sent",
        );
        Ok(admin_emails.len())
    }
}
