//! Machine translation behind the [`Translator`] trait.
//!
//! The production implementation is [`GoogleTranslator`] (Google Cloud
//! Translation v2 REST API). When no API key is configured the server uses
//! [`UnconfiguredTranslator`], and tests inject their own fake.

pub mod config;
pub mod google;

use async_trait::async_trait;

pub use config::TranslateConfig;
pub use google::GoogleTranslator;

/// Errors from the translation layer.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// No API key is configured.
    #[error("Translation service is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Translation API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The API answered with fewer translations than texts sent.
    #[error("Translation API returned {received} translations for {sent} texts")]
    EmptyResponse { sent: usize, received: usize },
}

/// A machine-translation backend.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `texts` from `source` to `target`, preserving order.
    ///
    /// Implementations must return exactly one translation per input text
    /// and must not make any request for an empty slice.
    async fn translate_many(
        &self,
        texts: &[String],
        target: &str,
        source: &str,
    ) -> Result<Vec<String>, TranslateError>;

    /// Translate a single text.
    async fn translate_one(
        &self,
        text: &str,
        target: &str,
        source: &str,
    ) -> Result<String, TranslateError> {
        let mut out = self
            .translate_many(&[text.to_string()], target, source)
            .await?;
        out.pop()
            .ok_or(TranslateError::EmptyResponse { sent: 1, received: 0 })
    }

    /// Whether calls can succeed at all. Reported by the health check.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Translator used when no API key is configured. Every call fails with
/// [`TranslateError::NotConfigured`], except empty batches.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredTranslator;

#[async_trait]
impl Translator for UnconfiguredTranslator {
    async fn translate_many(
        &self,
        texts: &[String],
        _target: &str,
        _source: &str,
    ) -> Result<Vec<String>, TranslateError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        Err(TranslateError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}
