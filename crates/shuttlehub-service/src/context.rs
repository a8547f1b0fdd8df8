//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shuttlehub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the bearer token by the API layer and passed into service
/// methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// The user's display name (convenience field from the claims).
    pub name: String,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        name: String,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            role,
            name,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user is a driver.
    pub fn is_driver(&self) -> bool {
        self.role.is_driver()
    }

    /// Returns whether the current user is a student.
    pub fn is_student(&self) -> bool {
        self.role.is_student()
    }
}
