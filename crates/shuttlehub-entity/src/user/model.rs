//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user on the campus transport platform.
///
/// All roles share one table; the `role` discriminant selects which of the
/// role-specific columns are meaningful. Account management and credential
/// issuance are handled by an external service — this row is read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Human-readable display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Role discriminant.
    pub role: UserRole,
    /// Profile picture URL.
    pub profile_picture: Option<String>,
    /// Student registration number (students only).
    pub student_number: Option<String>,
    /// Driving license number (drivers only).
    pub license_number: Option<String>,
    /// Whether the transport office has approved this driver (drivers only).
    pub is_approved: Option<bool>,
    /// Whether the driver is currently available for trips (drivers only).
    pub is_available: Option<bool>,
    /// The shuttle currently assigned to this driver (drivers only).
    pub assigned_shuttle_id: Option<Uuid>,
    /// Average rating received from students (drivers only).
    pub driver_rating: Option<f32>,
    /// Lifetime completed trip count (drivers only).
    pub total_trips: Option<i32>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether this user is a driver cleared to take bookings.
    pub fn is_approved_driver(&self) -> bool {
        self.role.is_driver() && self.is_approved.unwrap_or(false)
    }
}
