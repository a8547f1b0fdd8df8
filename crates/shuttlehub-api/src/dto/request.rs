//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create booking request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Target shuttle.
    pub shuttle_id: Uuid,
    /// Requested departure time.
    pub trip_time: DateTime<Utc>,
    /// Pickup location description.
    #[validate(length(min = 1, message = "Pickup location is required"))]
    pub pickup_location: String,
    /// Dropoff location description.
    #[validate(length(min = 1, message = "Dropoff location is required"))]
    pub dropoff_location: String,
    /// Route override; defaults to the shuttle's route.
    pub route: Option<String>,
}

/// Booking status update request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateBookingStatusRequest {
    /// Requested status, as a lowercase string.
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Booking rating request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateBookingRequest {
    /// Star rating.
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    /// Optional feedback text.
    pub feedback: Option<String>,
}

/// Shuttle availability override request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    /// New available seat count.
    pub available_seats: i32,
}

/// Shuttle location report body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuttleLocationRequest {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range_validation() {
        let ok = RateBookingRequest {
            rating: 4,
            feedback: None,
        };
        assert!(ok.validate().is_ok());

        let too_high = RateBookingRequest {
            rating: 6,
            feedback: None,
        };
        assert!(too_high.validate().is_err());

        let too_low = RateBookingRequest {
            rating: 0,
            feedback: None,
        };
        assert!(too_low.validate().is_err());
    }

    #[test]
    fn test_booking_request_requires_locations() {
        let req = CreateBookingRequest {
            shuttle_id: Uuid::new_v4(),
            trip_time: Utc::now(),
            pickup_location: String::new(),
            dropoff_location: "Library".to_string(),
            route: None,
        };
        assert!(req.validate().is_err());
    }
}
