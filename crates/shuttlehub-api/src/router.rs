//! Route definitions for the ShuttleHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(booking_routes())
        .merge(shuttle_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Booking lifecycle endpoints.
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::create_booking))
        .route(
            "/bookings/student",
            get(handlers::booking::my_student_bookings),
        )
        .route(
            "/bookings/student/{student_id}",
            get(handlers::booking::student_bookings),
        )
        .route(
            "/bookings/driver",
            get(handlers::booking::my_driver_bookings),
        )
        .route(
            "/bookings/driver/{driver_id}",
            get(handlers::booking::driver_bookings),
        )
        .route("/bookings/{id}/status", patch(handlers::booking::update_status))
        .route("/bookings/{id}/rate", patch(handlers::booking::rate_booking))
}

/// Shuttle read and administrative endpoints.
fn shuttle_routes() -> Router<AppState> {
    Router::new()
        .route("/shuttles", get(handlers::shuttle::list_shuttles))
        .route("/shuttles/available", get(handlers::shuttle::list_available))
        .route("/shuttles/{id}", get(handlers::shuttle::get_shuttle))
        .route(
            "/shuttles/{id}/availability",
            patch(handlers::shuttle::update_availability),
        )
        .route(
            "/shuttles/{id}/toggle-status",
            patch(handlers::shuttle::toggle_status),
        )
        .route(
            "/shuttles/{id}/location",
            post(handlers::shuttle::publish_location),
        )
}

/// Notification endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list_notifications))
        .route(
            "/notifications/read-all",
            patch(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            patch(handlers::notification::mark_read),
        )
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
