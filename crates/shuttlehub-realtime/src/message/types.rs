//! Inbound and outbound WebSocket message type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shuttlehub_entity::booking::BookingStatus;
use shuttlehub_entity::notification::{Notification, NotificationKind};

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Join a shuttle's room (e.g. a driver app tracking its own vehicle).
    #[serde(rename = "join:shuttle")]
    JoinShuttle {
        /// Shuttle whose room to join.
        shuttle_id: Uuid,
    },
    /// Leave a shuttle's room.
    #[serde(rename = "leave:shuttle")]
    LeaveShuttle {
        /// Shuttle whose room to leave.
        shuttle_id: Uuid,
    },
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
    /// Mark a notification as read.
    MarkRead {
        /// Notification ID.
        notification_id: Uuid,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Notification delivery (unicast to the recipient's user room).
    Notification {
        /// Notification ID.
        id: Uuid,
        /// Recipient user.
        user_id: Uuid,
        /// Title.
        title: String,
        /// Body text.
        message: String,
        /// Read flag (always false on push).
        is_read: bool,
        /// Notification kind.
        kind: NotificationKind,
        /// Related entity, if any.
        related_item_id: Option<Uuid>,
        /// When the notification was created.
        created_at: DateTime<Utc>,
    },
    /// A booking changed status (unicast to the student's room).
    BookingStatusChange {
        /// Booking ID.
        booking_id: Uuid,
        /// New status.
        status: BookingStatus,
    },
    /// A shuttle's seat count changed (broadcast to all clients).
    ShuttleAvailability {
        /// Shuttle ID.
        shuttle_id: Uuid,
        /// Seats now available.
        available_seats: i32,
    },
    /// A shuttle reported its position (multicast to the shuttle's room).
    ShuttleLocation {
        /// Shuttle ID.
        shuttle_id: Uuid,
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
        /// When the position was recorded.
        recorded_at: DateTime<Utc>,
    },
    /// Room join confirmed.
    Joined {
        /// Room name.
        room: String,
    },
    /// Room leave confirmed.
    Left {
        /// Room name.
        room: String,
    },
    /// Ping (server keepalive).
    Ping {
        /// Server timestamp.
        timestamp: i64,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

impl OutboundMessage {
    /// Builds a notification push from a persisted row.
    pub fn from_notification(notification: &Notification) -> Self {
        Self::Notification {
            id: notification.id,
            user_id: notification.user_id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            is_read: notification.is_read,
            kind: notification.kind,
            related_item_id: notification.related_item_id,
            created_at: notification.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_event_names() {
        let msg: InboundMessage =
            serde_json::from_str(&format!(
                "{{\"type\":\"join:shuttle\",\"shuttle_id\":\"{}\"}}",
                Uuid::new_v4()
            ))
            .unwrap();
        assert!(matches!(msg, InboundMessage::JoinShuttle { .. }));

        let msg: InboundMessage =
            serde_json::from_str("{\"type\":\"pong\",\"timestamp\":17}").unwrap();
        assert!(matches!(msg, InboundMessage::Pong { timestamp: 17 }));
    }

    #[test]
    fn test_outbound_event_names() {
        let msg = OutboundMessage::ShuttleAvailability {
            shuttle_id: Uuid::new_v4(),
            available_seats: 3,
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(json["type"], "shuttle_availability");
        assert_eq!(json["available_seats"], 3);

        let msg = OutboundMessage::BookingStatusChange {
            booking_id: Uuid::new_v4(),
            status: BookingStatus::Confirmed,
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(json["type"], "booking_status_change");
        assert_eq!(json["status"], "confirmed");
    }

    #[test]
    fn test_unknown_inbound_rejected() {
        assert!(serde_json::from_str::<InboundMessage>("{\"type\":\"subscribe\"}").is_err());
    }
}
