//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// A student's reservation of one seat on a shuttle run.
///
/// Bookings are never physically deleted; terminal rows are retained for
/// audit and rating history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The shuttle this booking holds a seat on.
    pub shuttle_id: Uuid,
    /// The student who made the booking.
    pub student_id: Uuid,
    /// The driver assigned at booking time.
    pub driver_id: Uuid,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// When the booking was created.
    pub booking_time: DateTime<Utc>,
    /// The requested trip departure time.
    pub trip_time: DateTime<Utc>,
    /// Pickup location description.
    pub pickup_location: String,
    /// Dropoff location description.
    pub dropoff_location: String,
    /// Route description, defaulted from the shuttle at creation.
    pub route: String,
    /// Star rating (1-5), settable once after completion.
    pub rating: Option<i32>,
    /// Free-form feedback accompanying the rating.
    pub feedback: Option<String>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Check whether this booking has already received a rating.
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}
