//! Booking repository implementation.
//!
//! Mutations that pair with a seat ledger change accept the caller's
//! transaction; pure reads and the single-row rating update run on the pool.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use shuttlehub_core::error::{AppError, ErrorKind};
use shuttlehub_core::result::AppResult;
use shuttlehub_entity::booking::{Booking, BookingStatus};

/// Fields required to insert a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Target shuttle.
    pub shuttle_id: Uuid,
    /// Booking student.
    pub student_id: Uuid,
    /// Driver assigned at creation.
    pub driver_id: Uuid,
    /// Requested departure time.
    pub trip_time: DateTime<Utc>,
    /// Pickup location description.
    pub pickup_location: String,
    /// Dropoff location description.
    pub dropoff_location: String,
    /// Route description.
    pub route: String,
}

/// Repository for booking rows.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a booking by id.
    pub async fn find_by_id(&self, booking_id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch booking", e))
    }

    /// Insert a new booking in `pending` state on the caller's transaction.
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new: &NewBooking,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings \
             (shuttle_id, student_id, driver_id, status, trip_time, pickup_location, dropoff_location, route) \
             VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(new.shuttle_id)
        .bind(new.student_id)
        .bind(new.driver_id)
        .bind(new.trip_time)
        .bind(&new.pickup_location)
        .bind(&new.dropoff_location)
        .bind(&new.route)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create booking", e))
    }

    /// Update a booking's status on the caller's transaction.
    pub async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(booking_id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update booking status", e)
        })
    }

    /// Persist a rating and optional feedback. Single-row update, no
    /// transaction required.
    pub async fn set_rating(
        &self,
        booking_id: Uuid,
        rating: i32,
        feedback: Option<&str>,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET rating = $2, feedback = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(booking_id)
        .bind(rating)
        .bind(feedback)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save rating", e))
    }

    /// List a student's bookings, newest first.
    pub async fn find_by_student(&self, student_id: Uuid) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE student_id = $1 ORDER BY created_at DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list student bookings", e)
        })
    }

    /// List a driver's bookings, newest first.
    pub async fn find_by_driver(&self, driver_id: Uuid) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE driver_id = $1 ORDER BY created_at DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list driver bookings", e)
        })
    }
}
