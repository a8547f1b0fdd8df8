//! Notification dispatcher — routes domain events onto the wire.
//!
//! Implements the service layer's [`EventPublisher`] port. Delivery is
//! best-effort and at-most-once: durable state was already persisted by the
//! caller, so nothing here can fail the triggering request.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use shuttlehub_entity::booking::BookingStatus;
use shuttlehub_entity::notification::Notification;
use shuttlehub_service::events::{EventPublisher, ShuttleLocation};

use crate::connection::manager::ConnectionManager;
use crate::message::types::OutboundMessage;
use crate::room::shuttle_room;

/// Routes domain events to the right rooms.
#[derive(Debug)]
pub struct NotificationDispatcher {
    /// Connection manager for sending WS messages.
    connections: Arc<ConnectionManager>,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl EventPublisher for NotificationDispatcher {
    async fn notification_created(&self, notification: &Notification) {
        self.connections.send_to_user(
            notification.user_id,
            &OutboundMessage::from_notification(notification),
        );
    }

    async fn booking_status_changed(
        &self,
        student_id: Uuid,
        booking_id: Uuid,
        status: BookingStatus,
    ) {
        self.connections.send_to_user(
            student_id,
            &OutboundMessage::BookingStatusChange { booking_id, status },
        );
    }

    async fn shuttle_availability_changed(&self, shuttle_id: Uuid, available_seats: i32) {
        self.connections.broadcast_all(&OutboundMessage::ShuttleAvailability {
            shuttle_id,
            available_seats,
        });
    }

    async fn shuttle_location_updated(&self, shuttle_id: Uuid, location: &ShuttleLocation) {
        self.connections.send_to_room(
            &shuttle_room(shuttle_id),
            &OutboundMessage::ShuttleLocation {
                shuttle_id,
                latitude: location.latitude,
                longitude: location.longitude,
                recorded_at: location.recorded_at,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shuttlehub_core::config::realtime::RealtimeConfig;
    use shuttlehub_entity::notification::{NotificationKind, NotificationRef};
    use shuttlehub_entity::user::UserRole;
    use crate::room::RoomRegistry;

    fn setup() -> (Arc<ConnectionManager>, NotificationDispatcher) {
        let manager = Arc::new(ConnectionManager::new(
            RealtimeConfig::default(),
            Arc::new(RoomRegistry::new()),
        ));
        let dispatcher = NotificationDispatcher::new(Arc::clone(&manager));
        (manager, dispatcher)
    }

    fn notification(user_id: Uuid) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id,
            title: "Booking Confirmed".to_string(),
            message: "Your booking for Campus Loop 2 has been confirmed.".to_string(),
            is_read: false,
            kind: NotificationKind::Booking,
            related_item_id: Some(Uuid::new_v4()),
            ref_model: NotificationRef::Booking,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_notification_is_unicast_to_recipient() {
        let (manager, dispatcher) = setup();
        let recipient = Uuid::new_v4();
        let bystander = Uuid::new_v4();

        let (_h1, mut recipient_rx) =
            manager.register(recipient, UserRole::Student, "Sam".to_string());
        let (_h2, mut bystander_rx) =
            manager.register(bystander, UserRole::Student, "Pat".to_string());

        dispatcher.notification_created(&notification(recipient)).await;

        assert!(matches!(
            recipient_rx.recv().await.unwrap(),
            OutboundMessage::Notification { .. }
        ));
        assert!(bystander_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_availability_is_broadcast() {
        let (manager, dispatcher) = setup();
        let (_h1, mut rx1) =
            manager.register(Uuid::new_v4(), UserRole::Student, "A".to_string());
        let (_h2, mut rx2) =
            manager.register(Uuid::new_v4(), UserRole::Driver, "B".to_string());

        dispatcher
            .shuttle_availability_changed(Uuid::new_v4(), 4)
            .await;

        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await.unwrap() {
                OutboundMessage::ShuttleAvailability {
                    available_seats, ..
                } => assert_eq!(available_seats, 4),
                other => panic!("unexpected message: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_location_reaches_room_members_only() {
        let (manager, dispatcher) = setup();
        let shuttle = Uuid::new_v4();

        let (member, mut member_rx) =
            manager.register(Uuid::new_v4(), UserRole::Driver, "D".to_string());
        let (_outsider, mut outsider_rx) =
            manager.register(Uuid::new_v4(), UserRole::Student, "S".to_string());

        let join = format!("{{\"type\":\"join:shuttle\",\"shuttle_id\":\"{shuttle}\"}}");
        manager.handle_inbound(&member.id, &join).await;
        // Drain the join ack.
        member_rx.recv().await.unwrap();

        dispatcher
            .shuttle_location_updated(
                shuttle,
                &ShuttleLocation {
                    latitude: 52.1,
                    longitude: 4.3,
                    recorded_at: Utc::now(),
                },
            )
            .await;

        assert!(matches!(
            member_rx.recv().await.unwrap(),
            OutboundMessage::ShuttleLocation { .. }
        ));
        assert!(outsider_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_status_change_goes_to_student() {
        let (manager, dispatcher) = setup();
        let student = Uuid::new_v4();
        let (_h, mut rx) = manager.register(student, UserRole::Student, "S".to_string());

        let booking_id = Uuid::new_v4();
        dispatcher
            .booking_status_changed(student, booking_id, BookingStatus::Canceled)
            .await;

        match rx.recv().await.unwrap() {
            OutboundMessage::BookingStatusChange {
                booking_id: got,
                status,
            } => {
                assert_eq!(got, booking_id);
                assert_eq!(status, BookingStatus::Canceled);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
