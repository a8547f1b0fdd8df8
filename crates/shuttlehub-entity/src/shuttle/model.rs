//! Shuttle entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A shuttle vehicle on a scheduled campus route.
///
/// `available_seats` is the seat ledger: it is mutated exclusively by the
/// ledger queries in the shuttle repository and always stays within
/// `0..=capacity` (enforced both in SQL and by a database CHECK constraint).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shuttle {
    /// Unique shuttle identifier.
    pub id: Uuid,
    /// Display name, e.g. "Campus Loop 2".
    pub name: String,
    /// Total seat capacity. Immutable after creation.
    pub capacity: i32,
    /// Remaining bookable seats.
    pub available_seats: i32,
    /// The driver currently assigned to this shuttle.
    pub driver_id: Option<Uuid>,
    /// Route description.
    pub route: String,
    /// Whether the shuttle is accepting bookings.
    pub is_active: bool,
    /// When the shuttle was created.
    pub created_at: DateTime<Utc>,
    /// When the shuttle was last updated.
    pub updated_at: DateTime<Utc>,
}
