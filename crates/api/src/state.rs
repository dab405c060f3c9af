use std::sync::Arc;

use renungan_notify::Mailer;
use renungan_translate::Translator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: renungan_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Machine translation backend.
    pub translator: Arc<dyn Translator>,
    /// SMTP mailer; `None` when email is not configured.
    pub mailer: Option<Arc<Mailer>>,
}

impl AppState {
    /// Language content is authored in.
    pub fn source_language(&self) -> &str {
        &self.config.source_language
    }
}
