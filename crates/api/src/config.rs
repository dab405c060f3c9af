use renungan_core::language::{normalize_language_code, validate_language_code, SOURCE_LANGUAGE};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Login session lifetime in hours (default: `168`, one week).
    pub session_ttl_hours: i64,
    /// Mark cookies `Secure` (default: `false`; enable behind HTTPS).
    pub cookie_secure: bool,
    /// Language content is authored in (default: `id`).
    pub source_language: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `SESSION_TTL_HOURS`    | `168`                   |
    /// | `COOKIE_SECURE`        | `false`                 |
    /// | `SOURCE_LANGUAGE`      | `id`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "168".into())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let source_language = std::env::var("SOURCE_LANGUAGE")
            .map(|v| normalize_language_code(&v))
            .unwrap_or_else(|_| SOURCE_LANGUAGE.into());
        if let Err(e) = validate_language_code(&source_language) {
            panic!("SOURCE_LANGUAGE is invalid: {e}");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_hours,
            cookie_secure,
            source_language,
        }
    }
}
