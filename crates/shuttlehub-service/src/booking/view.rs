//! Assembled booking display object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shuttlehub_entity::booking::{Booking, BookingStatus};

/// A booking joined with shuttle/student/driver display names.
///
/// Assembled by the orchestrator with explicit follow-up queries; there is
/// no hidden lazy population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingView {
    /// Booking identifier.
    pub id: Uuid,
    /// Shuttle identifier.
    pub shuttle_id: Uuid,
    /// Shuttle display name.
    pub shuttle_name: String,
    /// Student identifier.
    pub student_id: Uuid,
    /// Student display name.
    pub student_name: String,
    /// Driver identifier.
    pub driver_id: Uuid,
    /// Driver display name.
    pub driver_name: String,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// When the booking was created.
    pub booking_time: DateTime<Utc>,
    /// Requested departure time.
    pub trip_time: DateTime<Utc>,
    /// Pickup location description.
    pub pickup_location: String,
    /// Dropoff location description.
    pub dropoff_location: String,
    /// Route description.
    pub route: String,
    /// Star rating, when set.
    pub rating: Option<i32>,
    /// Feedback text, when set.
    pub feedback: Option<String>,
}

impl BookingView {
    /// Builds a view from a booking row and resolved display names.
    pub fn assemble(
        booking: Booking,
        shuttle_name: String,
        student_name: String,
        driver_name: String,
    ) -> Self {
        Self {
            id: booking.id,
            shuttle_id: booking.shuttle_id,
            shuttle_name,
            student_id: booking.student_id,
            student_name,
            driver_id: booking.driver_id,
            driver_name,
            status: booking.status,
            booking_time: booking.booking_time,
            trip_time: booking.trip_time,
            pickup_location: booking.pickup_location,
            dropoff_location: booking.dropoff_location,
            route: booking.route,
            rating: booking.rating,
            feedback: booking.feedback,
        }
    }
}
