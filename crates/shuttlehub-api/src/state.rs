//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use shuttlehub_auth::jwt::JwtDecoder;
use shuttlehub_cache::CacheManager;
use shuttlehub_core::config::AppConfig;
use shuttlehub_realtime::RealtimeEngine;
use shuttlehub_service::booking::BookingService;
use shuttlehub_service::notification::NotificationService;
use shuttlehub_service::shuttle::ShuttleService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// Bearer token validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// WebSocket realtime engine.
    pub realtime: Arc<RealtimeEngine>,
    /// Booking orchestration service.
    pub booking_service: Arc<BookingService>,
    /// Shuttle read/administrative service.
    pub shuttle_service: Arc<ShuttleService>,
    /// Notification service.
    pub notification_service: Arc<NotificationService>,
}
