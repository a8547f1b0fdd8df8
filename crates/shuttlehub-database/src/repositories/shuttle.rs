//! Shuttle repository — lookups plus the seat ledger.
//!
//! The seat ledger is the only contended resource in the system. Both
//! mutations are single conditional UPDATE statements so that concurrent
//! reservations against the same shuttle serialize on the row lock and can
//! never drive `available_seats` outside `0..=capacity`.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use shuttlehub_core::error::{AppError, ErrorKind};
use shuttlehub_core::result::AppResult;
use shuttlehub_entity::shuttle::Shuttle;

/// Outcome of a seat reservation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatReservation {
    /// One seat was taken; the remaining count is returned.
    Reserved {
        /// Seats left after the decrement.
        available_seats: i32,
    },
    /// The shuttle exists and is active but has no seats left.
    Exhausted,
    /// The shuttle exists but is not accepting bookings.
    Inactive,
    /// No shuttle with that id.
    NotFound,
}

/// Repository for shuttle rows and the seat ledger.
#[derive(Debug, Clone)]
pub struct ShuttleRepository {
    pool: PgPool,
}

impl ShuttleRepository {
    /// Create a new shuttle repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a shuttle by id.
    pub async fn find_by_id(&self, shuttle_id: Uuid) -> AppResult<Option<Shuttle>> {
        sqlx::query_as::<_, Shuttle>("SELECT * FROM shuttles WHERE id = $1")
            .bind(shuttle_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch shuttle", e))
    }

    /// List all shuttles, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Shuttle>> {
        sqlx::query_as::<_, Shuttle>("SELECT * FROM shuttles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shuttles", e))
    }

    /// List active shuttles that still have bookable seats.
    pub async fn find_available(&self) -> AppResult<Vec<Shuttle>> {
        sqlx::query_as::<_, Shuttle>(
            "SELECT * FROM shuttles WHERE is_active AND available_seats > 0 \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list available shuttles", e)
        })
    }

    /// Atomically take one seat from a shuttle.
    ///
    /// The decrement is a single conditional UPDATE: it only fires while the
    /// shuttle is active and a seat remains, so two concurrent reservations
    /// cannot both consume the last seat. Runs on the caller's transaction
    /// and therefore commits or rolls back with the accompanying booking
    /// write.
    pub async fn reserve_seat(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shuttle_id: Uuid,
    ) -> AppResult<SeatReservation> {
        let remaining: Option<i32> = sqlx::query_scalar(
            "UPDATE shuttles \
             SET available_seats = available_seats - 1, updated_at = NOW() \
             WHERE id = $1 AND is_active AND available_seats > 0 \
             RETURNING available_seats",
        )
        .bind(shuttle_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reserve seat", e))?;

        if let Some(available_seats) = remaining {
            return Ok(SeatReservation::Reserved { available_seats });
        }

        // Nothing updated — read the row to report why.
        let state: Option<(bool, i32)> =
            sqlx::query_as("SELECT is_active, available_seats FROM shuttles WHERE id = $1")
                .bind(shuttle_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to inspect shuttle", e)
                })?;

        Ok(match state {
            None => SeatReservation::NotFound,
            Some((false, _)) => SeatReservation::Inactive,
            Some((true, _)) => SeatReservation::Exhausted,
        })
    }

    /// Atomically return one seat to a shuttle.
    ///
    /// The increment is clamped at `capacity` so a duplicate release can
    /// never overfill the ledger. Returns the new seat count, or `None`
    /// when the shuttle row no longer exists.
    pub async fn release_seat(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shuttle_id: Uuid,
    ) -> AppResult<Option<i32>> {
        sqlx::query_scalar(
            "UPDATE shuttles \
             SET available_seats = LEAST(available_seats + 1, capacity), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING available_seats",
        )
        .bind(shuttle_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release seat", e))
    }

    /// Overwrite the available seat count (administrative correction).
    ///
    /// Rejected in the service layer when the count exceeds capacity; the
    /// CHECK constraint is the final guard.
    pub async fn set_available_seats(
        &self,
        shuttle_id: Uuid,
        available_seats: i32,
    ) -> AppResult<Option<Shuttle>> {
        sqlx::query_as::<_, Shuttle>(
            "UPDATE shuttles SET available_seats = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(shuttle_id)
        .bind(available_seats)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update availability", e)
        })
    }

    /// Flip the active flag. Returns the updated row.
    pub async fn toggle_active(&self, shuttle_id: Uuid) -> AppResult<Option<Shuttle>> {
        sqlx::query_as::<_, Shuttle>(
            "UPDATE shuttles SET is_active = NOT is_active, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(shuttle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle shuttle", e))
    }

    /// Fetch display names for a set of shuttles.
    pub async fn display_names(
        &self,
        shuttle_ids: &[Uuid],
    ) -> AppResult<std::collections::HashMap<Uuid, String>> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM shuttles WHERE id = ANY($1)")
                .bind(shuttle_ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to fetch shuttle names", e)
                })?;
        Ok(rows.into_iter().collect())
    }
}
