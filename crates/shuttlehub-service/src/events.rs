//! Realtime event port.
//!
//! Services publish state changes through this trait; the WebSocket engine
//! implements it. Delivery is best-effort — implementations must never
//! surface a push failure back into the triggering request.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shuttlehub_entity::booking::BookingStatus;
use shuttlehub_entity::notification::Notification;

/// A transient shuttle position report. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuttleLocation {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// When the position was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Port through which services publish realtime events.
#[async_trait]
pub trait EventPublisher: Send + Sync + std::fmt::Debug {
    /// A notification was persisted; push it to the recipient's room.
    async fn notification_created(&self, notification: &Notification);

    /// A booking changed status; push to the student's room.
    async fn booking_status_changed(
        &self,
        student_id: Uuid,
        booking_id: Uuid,
        status: BookingStatus,
    );

    /// A shuttle's seat count changed; broadcast to all connected clients.
    async fn shuttle_availability_changed(&self, shuttle_id: Uuid, available_seats: i32);

    /// A shuttle reported its position; multicast to that shuttle's room.
    async fn shuttle_location_updated(&self, shuttle_id: Uuid, location: &ShuttleLocation);
}
