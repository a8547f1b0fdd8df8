//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use shuttlehub_core::error::AppError;
use shuttlehub_entity::notification::Notification;

use crate::dto::response::{ApiResponse, CountResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Notification>>>, AppError> {
    let notifications = state.notification_service.list_notifications(&auth).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// PATCH /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, AppError> {
    let notification = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// PATCH /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, AppError> {
    let count = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
