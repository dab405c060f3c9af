//! Google Cloud Translation (v2 REST) client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::TranslateConfig;
use crate::{TranslateError, Translator};

/// Most `q` segments the v2 API accepts in one request.
pub const MAX_SEGMENTS_PER_REQUEST: usize = 128;

/// HTTP client for the Google Cloud Translation v2 API.
pub struct GoogleTranslator {
    client: reqwest::Client,
    config: TranslateConfig,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    target: &'a str,
    source: &'a str,
    /// `html` keeps markup in section bodies intact.
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

impl GoogleTranslator {
    pub fn new(config: TranslateConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TranslateError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TranslateError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate_many(
        &self,
        texts: &[String],
        target: &str,
        source: &str,
    ) -> Result<Vec<String>, TranslateError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut translations = Vec::with_capacity(texts.len());
        for body in requests(texts, target, source) {
            let sent = body.q.len();
            let response = self
                .client
                .post(&self.config.endpoint)
                .query(&[("key", self.config.api_key.as_str())])
                .json(&body)
                .send()
                .await?;
            let response = Self::ensure_success(response).await?;
            let parsed: TranslateResponse = response.json().await?;
            translations.extend(into_texts(parsed, sent)?);
        }
        tracing::debug!(count = translations.len(), %source, %target, "Translated batch");
        Ok(translations)
    }
}

/// One request body per [`MAX_SEGMENTS_PER_REQUEST`] texts, in order.
fn requests<'a>(texts: &'a [String], target: &'a str, source: &'a str) -> Vec<TranslateRequest<'a>> {
    texts
        .chunks(MAX_SEGMENTS_PER_REQUEST)
        .map(|q| TranslateRequest {
            q,
            target,
            source,
            format: "html",
        })
        .collect()
}

fn into_texts(response: TranslateResponse, sent: usize) -> Result<Vec<String>, TranslateError> {
    let received = response.data.translations.len();
    if received < sent {
        return Err(TranslateError::EmptyResponse { sent, received });
    }
    Ok(response
        .data
        .translations
        .into_iter()
        .take(sent)
        .map(|t| t.translated_text)
        .collect())
}
