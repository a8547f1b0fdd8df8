//! Notification kind and back-reference enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a notification, used for client-side filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Booking lifecycle events addressed to students.
    Booking,
    /// Trip events addressed to drivers.
    Trip,
    /// Platform announcements.
    System,
    /// Rating and feedback events.
    Feedback,
}

impl NotificationKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Trip => "trip",
            Self::System => "system",
            Self::Feedback => "feedback",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entity type a notification's `related_item_id` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_ref", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationRef {
    /// The related item is a booking.
    Booking,
    /// The related item is a user.
    User,
    /// The related item is a shuttle.
    Shuttle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::Feedback).unwrap(),
            "\"feedback\""
        );
        assert_eq!(
            serde_json::from_str::<NotificationRef>("\"shuttle\"").unwrap(),
            NotificationRef::Shuttle
        );
    }
}
