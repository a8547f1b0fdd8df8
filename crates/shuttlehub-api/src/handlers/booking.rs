//! Booking handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use shuttlehub_core::error::AppError;
use shuttlehub_entity::booking::BookingStatus;
use shuttlehub_service::booking::{BookingView, CreateBookingInput};

use crate::dto::request::{CreateBookingRequest, RateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingView>>), AppError> {
    if !auth.is_student() {
        return Err(AppError::forbidden("Only students can create bookings"));
    }
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let booking = state
        .booking_service
        .create_booking(
            &auth,
            CreateBookingInput {
                shuttle_id: req.shuttle_id,
                trip_time: req.trip_time,
                pickup_location: req.pickup_location,
                dropoff_location: req.dropoff_location,
                route: req.route,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// PATCH /api/bookings/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingView>>, AppError> {
    if !(auth.is_driver() || auth.is_admin()) {
        return Err(AppError::forbidden(
            "Only drivers and admins can update booking status",
        ));
    }

    let status: BookingStatus = req.status.parse()?;

    let booking = state
        .booking_service
        .update_booking_status(&auth, id, status)
        .await?;

    Ok(Json(ApiResponse::ok(booking)))
}

/// PATCH /api/bookings/{id}/rate
pub async fn rate_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RateBookingRequest>,
) -> Result<Json<ApiResponse<BookingView>>, AppError> {
    if !auth.is_student() {
        return Err(AppError::forbidden("Only students can rate bookings"));
    }
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let booking = state
        .booking_service
        .rate_booking(&auth, id, req.rating, req.feedback)
        .await?;

    Ok(Json(ApiResponse::ok(booking)))
}

/// GET /api/bookings/student
pub async fn my_student_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<BookingView>>>, AppError> {
    if !(auth.is_student() || auth.is_admin()) {
        return Err(AppError::forbidden("Student or admin role required"));
    }
    let bookings = state.booking_service.bookings_for_student(&auth, None).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/student/{student_id}
pub async fn student_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BookingView>>>, AppError> {
    if !(auth.is_student() || auth.is_admin()) {
        return Err(AppError::forbidden("Student or admin role required"));
    }
    let bookings = state
        .booking_service
        .bookings_for_student(&auth, Some(student_id))
        .await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/driver
pub async fn my_driver_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<BookingView>>>, AppError> {
    if !(auth.is_driver() || auth.is_admin()) {
        return Err(AppError::forbidden("Driver or admin role required"));
    }
    let bookings = state.booking_service.bookings_for_driver(&auth, None).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/driver/{driver_id}
pub async fn driver_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BookingView>>>, AppError> {
    if !(auth.is_driver() || auth.is_admin()) {
        return Err(AppError::forbidden("Driver or admin role required"));
    }
    let bookings = state
        .booking_service
        .bookings_for_driver(&auth, Some(driver_id))
        .await?;
    Ok(Json(ApiResponse::ok(bookings)))
}
