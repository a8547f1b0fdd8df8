//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::{NotificationKind, NotificationRef};

/// A persisted notification addressed to one user.
///
/// Rows are written by the notification service as a side effect of booking
/// operations and retained indefinitely; mark-read flips are the only
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// Notification kind.
    pub kind: NotificationKind,
    /// The entity this notification is about (if any).
    pub related_item_id: Option<Uuid>,
    /// Which entity type `related_item_id` refers to.
    pub ref_model: NotificationRef,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}
