//! Health check handlers.

use axum::Json;
use axum::extract::State;

use shuttlehub_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database = match shuttlehub_database::connection::health_check(&state.db_pool).await {
        Ok(true) => "connected",
        _ => "unavailable",
    };
    let cache = match state.cache.health_check().await {
        Ok(true) => "connected",
        _ => "unavailable",
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
        cache: cache.to_string(),
        ws_connections: state.realtime.connections.connection_count(),
        online_users: state.realtime.connections.user_count(),
    }))
}
