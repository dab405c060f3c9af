//! Translation service configuration loaded from environment variables.

/// Default Google Cloud Translation v2 endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Configuration for [`crate::GoogleTranslator`].
///
/// | Env Var                      | Required | Default            |
/// |------------------------------|----------|--------------------|
/// | `GOOGLE_TRANSLATE_API_KEY`   | no       | unset (disabled)   |
/// | `GOOGLE_TRANSLATE_ENDPOINT`  | no       | Google v2 endpoint |
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl TranslateConfig {
    /// Load from the environment. Returns `None` when no API key is set, so
    /// the caller can fall back to an unconfigured translator.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        let endpoint = std::env::var("GOOGLE_TRANSLATE_ENDPOINT")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Some(Self { api_key, endpoint })
    }
}
