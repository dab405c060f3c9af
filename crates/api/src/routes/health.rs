use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether a translation API key is configured.
    pub translation_configured: bool,
    /// Whether SMTP notifications are configured.
    pub email_configured: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = renungan_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        translation_configured: state.translator.is_configured(),
        email_configured: state.mailer.is_some(),
    })
}

/// Mount health check routes (root level).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
