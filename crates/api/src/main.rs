use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use renungan_notify::{EmailConfig, Mailer};
use renungan_translate::{GoogleTranslator, TranslateConfig, Translator, UnconfiguredTranslator};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use renungan_api::background;
use renungan_api::config::ServerConfig;
use renungan_api::router::build_app_router;
use renungan_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "renungan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        source_language = %config.source_language,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = renungan_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    renungan_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    renungan_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Translation ---
    let translator: Arc<dyn Translator> = match TranslateConfig::from_env() {
        Some(cfg) => {
            tracing::info!(endpoint = %cfg.endpoint, "Machine translation enabled");
            Arc::new(GoogleTranslator::new(cfg))
        }
        None => {
            tracing::warn!("GOOGLE_TRANSLATE_API_KEY not set, pages fall back to source text");
            Arc::new(UnconfiguredTranslator)
        }
    };

    // --- Email ---
    let mailer = match EmailConfig::from_env() {
        Some(cfg) => {
            tracing::info!(smtp_host = %cfg.smtp_host, "Comment notifications enabled");
            Some(Arc::new(Mailer::new(cfg)))
        }
        None => {
            tracing::info!("SMTP_HOST not set, comment notifications disabled");
            None
        }
    };

    // --- Background jobs ---
    let cleanup_cancel = CancellationToken::new();
    let cleanup_handle = tokio::spawn(background::session_cleanup::run(
        pool.clone(),
        cleanup_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        translator,
        mailer,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cleanup_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_handle).await;
    tracing::info!("Session cleanup stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
