//! ShuttleHub Server — Campus Shuttle Booking Platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use shuttlehub_core::config::AppConfig;
use shuttlehub_core::error::AppError;
use shuttlehub_service::events::EventPublisher;

#[tokio::main]
async fn main() {
    let env = std::env::var("SHUTTLEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ShuttleHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = shuttlehub_database::connection::create_pool(&config.database).await?;

    shuttlehub_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Initialize cache ─────────────────────────────────
    tracing::info!("Initializing cache (provider: {})...", config.cache.provider);
    let cache = Arc::new(shuttlehub_cache::CacheManager::new(&config.cache).await?);

    // ── Step 3: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(shuttlehub_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let shuttle_repo = Arc::new(
        shuttlehub_database::repositories::shuttle::ShuttleRepository::new(db_pool.clone()),
    );
    let booking_repo = Arc::new(
        shuttlehub_database::repositories::booking::BookingRepository::new(db_pool.clone()),
    );
    let notification_repo = Arc::new(
        shuttlehub_database::repositories::notification::NotificationRepository::new(
            db_pool.clone(),
        ),
    );

    // ── Step 4: Initialize auth gateway ──────────────────────────
    let jwt_decoder = Arc::new(shuttlehub_auth::jwt::JwtDecoder::new(&config.auth));

    // ── Step 5: Initialize realtime engine ───────────────────────
    let realtime = Arc::new(shuttlehub_realtime::RealtimeEngine::new(&config.realtime));
    let events: Arc<dyn EventPublisher> = realtime.events.clone();

    // ── Step 6: Initialize services ──────────────────────────────
    tracing::info!("Initializing services...");
    let notification_service = Arc::new(
        shuttlehub_service::notification::NotificationService::new(
            Arc::clone(&notification_repo),
            Arc::clone(&events),
        ),
    );
    let booking_service = Arc::new(shuttlehub_service::booking::BookingService::new(
        db_pool.clone(),
        Arc::clone(&booking_repo),
        Arc::clone(&shuttle_repo),
        Arc::clone(&user_repo),
        Arc::clone(&notification_service),
        Arc::clone(&events),
    ));
    let shuttle_service = Arc::new(shuttlehub_service::shuttle::ShuttleService::new(
        Arc::clone(&shuttle_repo),
        Arc::clone(&user_repo),
        Arc::clone(&cache),
        Arc::clone(&events),
    ));
    tracing::info!("Services initialized");

    // ── Step 7: Build and start HTTP server ──────────────────────
    let app_state = shuttlehub_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        cache: Arc::clone(&cache),
        jwt_decoder: Arc::clone(&jwt_decoder),
        realtime: Arc::clone(&realtime),
        booking_service,
        shuttle_service,
        notification_service,
    };

    let app = shuttlehub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ShuttleHub server listening on {}", addr);

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    realtime.shutdown();
    db_pool.close().await;

    tracing::info!("ShuttleHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
