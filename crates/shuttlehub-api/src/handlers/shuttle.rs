//! Shuttle handlers.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use uuid::Uuid;

use shuttlehub_core::error::AppError;
use shuttlehub_service::events::ShuttleLocation;
use shuttlehub_service::shuttle::ShuttleView;

use crate::dto::request::{ShuttleLocationRequest, UpdateAvailabilityRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/shuttles
pub async fn list_shuttles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ShuttleView>>>, AppError> {
    let shuttles = state.shuttle_service.list_shuttles().await?;
    Ok(Json(ApiResponse::ok(shuttles)))
}

/// GET /api/shuttles/available
pub async fn list_available(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ShuttleView>>>, AppError> {
    let shuttles = state.shuttle_service.list_available().await?;
    Ok(Json(ApiResponse::ok(shuttles)))
}

/// GET /api/shuttles/{id}
pub async fn get_shuttle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShuttleView>>, AppError> {
    let shuttle = state.shuttle_service.get_shuttle(id).await?;
    Ok(Json(ApiResponse::ok(shuttle)))
}

/// PATCH /api/shuttles/{id}/availability
pub async fn update_availability(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAvailabilityRequest>,
) -> Result<Json<ApiResponse<ShuttleView>>, AppError> {
    if !(auth.is_admin() || auth.is_driver()) {
        return Err(AppError::forbidden(
            "Only admins and drivers can update availability",
        ));
    }

    let shuttle = state
        .shuttle_service
        .set_availability(&auth, id, req.available_seats)
        .await?;
    Ok(Json(ApiResponse::ok(shuttle)))
}

/// PATCH /api/shuttles/{id}/toggle-status
pub async fn toggle_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShuttleView>>, AppError> {
    if !auth.is_admin() {
        return Err(AppError::forbidden("Only admins can toggle shuttle status"));
    }

    let shuttle = state.shuttle_service.toggle_active(&auth, id).await?;
    Ok(Json(ApiResponse::ok(shuttle)))
}

/// POST /api/shuttles/{id}/location
pub async fn publish_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ShuttleLocationRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !auth.is_driver() {
        return Err(AppError::forbidden("Only drivers can publish locations"));
    }

    state
        .shuttle_service
        .publish_location(
            &auth,
            id,
            ShuttleLocation {
                latitude: req.latitude,
                longitude: req.longitude,
                recorded_at: Utc::now(),
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Location published".to_string(),
    })))
}
