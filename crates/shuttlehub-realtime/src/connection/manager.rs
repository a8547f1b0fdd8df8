//! Connection manager — handles connection lifecycle and message routing.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shuttlehub_core::config::realtime::RealtimeConfig;
use shuttlehub_entity::user::UserRole;

use crate::message::types::{InboundMessage, OutboundMessage};
use crate::room::{RoomRegistry, shuttle_room, user_room};

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Room registry.
    rooms: Arc<RoomRegistry>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig, rooms: Arc<RoomRegistry>) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            rooms,
            config,
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// The connection is admitted into its user's room immediately.
    /// Returns the connection handle and the receiver half of its outbound
    /// buffer.
    pub fn register(
        &self,
        user_id: Uuid,
        role: UserRole,
        name: String,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);

        let handle = Arc::new(ConnectionHandle::new(user_id, role, name, tx));

        // Enforce the per-user connection cap by evicting the oldest.
        let existing = self.pool.user_connections(&user_id);
        if existing.len() >= self.config.max_connections_per_user {
            warn!(
                user_id = %user_id,
                count = existing.len(),
                max = self.config.max_connections_per_user,
                "User at max connections, oldest will be replaced"
            );
            if let Some(oldest) = existing.first() {
                oldest.mark_closed();
                self.rooms.leave_all(oldest.id);
                self.pool.remove(&oldest.id);
            }
        }

        self.pool.add(handle.clone());
        self.rooms.join(user_room(user_id), handle.id);

        info!(
            conn_id = %handle.id,
            user_id = %user_id,
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection and cleans up its room memberships.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_closed();
            self.rooms.leave_all(*conn_id);

            info!(
                conn_id = %conn_id,
                user_id = %handle.user_id,
                "WebSocket connection unregistered"
            );
        }
    }

    /// Processes an inbound message from a client.
    pub async fn handle_inbound(&self, conn_id: &ConnectionId, raw_message: &str) {
        let handle = match self.pool.get(conn_id) {
            Some(h) => h,
            None => {
                warn!(conn_id = %conn_id, "Message from unknown connection");
                return;
            }
        };

        let msg: InboundMessage = match serde_json::from_str(raw_message) {
            Ok(m) => m,
            Err(e) => {
                handle.send(OutboundMessage::Error {
                    code: "INVALID_MESSAGE".to_string(),
                    message: format!("Failed to parse message: {e}"),
                });
                return;
            }
        };

        match msg {
            InboundMessage::JoinShuttle { shuttle_id } => {
                self.handle_join(&handle, shuttle_id);
            }
            InboundMessage::LeaveShuttle { shuttle_id } => {
                let room = shuttle_room(shuttle_id);
                self.rooms.leave(&room, handle.id);
                handle.send(OutboundMessage::Left { room });
                debug!(conn_id = %conn_id, shuttle_id = %shuttle_id, "Left shuttle room");
            }
            InboundMessage::Pong { .. } => {
                handle.record_pong().await;
            }
            InboundMessage::MarkRead { notification_id } => {
                // Read state changes flow through the REST surface.
                debug!(
                    conn_id = %conn_id,
                    notification_id = %notification_id,
                    "Mark read request over WS ignored"
                );
            }
        }
    }

    /// Handles a shuttle room join with membership limits.
    fn handle_join(&self, handle: &ConnectionHandle, shuttle_id: Uuid) {
        let current = self.rooms.membership_count(handle.id);
        if current >= self.config.max_subscriptions_per_connection {
            handle.send(OutboundMessage::Error {
                code: "MAX_SUBSCRIPTIONS".to_string(),
                message: format!(
                    "Maximum room memberships ({}) reached",
                    self.config.max_subscriptions_per_connection
                ),
            });
            return;
        }

        let room = shuttle_room(shuttle_id);
        self.rooms.join(room.clone(), handle.id);
        handle.send(OutboundMessage::Joined { room });

        debug!(
            conn_id = %handle.id,
            shuttle_id = %shuttle_id,
            "Joined shuttle room"
        );
    }

    /// Sends a message to a user's room (all of their connections).
    pub fn send_to_user(&self, user_id: Uuid, message: &OutboundMessage) {
        self.send_to_room(&user_room(user_id), message);
    }

    /// Sends a message to every member of a room.
    pub fn send_to_room(&self, room: &str, message: &OutboundMessage) {
        for conn_id in self.rooms.members(room) {
            if let Some(handle) = self.pool.get(&conn_id) {
                handle.send(message.clone());
            }
        }
    }

    /// Broadcasts a message to every connected client.
    pub fn broadcast_all(&self, message: &OutboundMessage) {
        for handle in self.pool.all_connections() {
            handle.send(message.clone());
        }
    }

    /// Sends a keepalive ping to every connected client.
    pub fn ping_all(&self) {
        let ping = OutboundMessage::Ping {
            timestamp: Utc::now().timestamp(),
        };
        self.broadcast_all(&ping);
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            conn.mark_closed();
            self.rooms.leave_all(conn.id);
            self.pool.remove(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Returns the number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConnectionManager {
        ConnectionManager::new(RealtimeConfig::default(), Arc::new(RoomRegistry::new()))
    }

    #[tokio::test]
    async fn test_register_auto_joins_user_room() {
        let mgr = manager();
        let user = Uuid::new_v4();
        let (_handle, mut rx) = mgr.register(user, UserRole::Student, "Sam".to_string());

        mgr.send_to_user(
            user,
            &OutboundMessage::Ping {
                timestamp: 1,
            },
        );

        let received = rx.recv().await.unwrap();
        assert!(matches!(received, OutboundMessage::Ping { timestamp: 1 }));
    }

    #[tokio::test]
    async fn test_join_and_leave_shuttle_room() {
        let mgr = manager();
        let user = Uuid::new_v4();
        let shuttle = Uuid::new_v4();
        let (handle, mut rx) = mgr.register(user, UserRole::Driver, "Dana".to_string());

        let join = format!("{{\"type\":\"join:shuttle\",\"shuttle_id\":\"{shuttle}\"}}");
        mgr.handle_inbound(&handle.id, &join).await;

        // Join ack.
        assert!(matches!(
            rx.recv().await.unwrap(),
            OutboundMessage::Joined { .. }
        ));

        mgr.send_to_room(
            &shuttle_room(shuttle),
            &OutboundMessage::ShuttleLocation {
                shuttle_id: shuttle,
                latitude: 1.0,
                longitude: 2.0,
                recorded_at: Utc::now(),
            },
        );
        assert!(matches!(
            rx.recv().await.unwrap(),
            OutboundMessage::ShuttleLocation { .. }
        ));

        let leave = format!("{{\"type\":\"leave:shuttle\",\"shuttle_id\":\"{shuttle}\"}}");
        mgr.handle_inbound(&handle.id, &leave).await;
        assert!(matches!(
            rx.recv().await.unwrap(),
            OutboundMessage::Left { .. }
        ));

        // No longer a member; nothing further arrives.
        mgr.send_to_room(
            &shuttle_room(shuttle),
            &OutboundMessage::Ping { timestamp: 2 },
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_max_connections_evicts_oldest() {
        let config = RealtimeConfig {
            max_connections_per_user: 2,
            ..RealtimeConfig::default()
        };
        let mgr = ConnectionManager::new(config, Arc::new(RoomRegistry::new()));
        let user = Uuid::new_v4();

        let (first, _rx1) = mgr.register(user, UserRole::Student, "Sam".to_string());
        let (_second, _rx2) = mgr.register(user, UserRole::Student, "Sam".to_string());
        let (_third, _rx3) = mgr.register(user, UserRole::Student, "Sam".to_string());

        assert_eq!(mgr.connection_count(), 2);
        assert!(!first.is_alive());
    }

    #[tokio::test]
    async fn test_invalid_payload_yields_error_message() {
        let mgr = manager();
        let (handle, mut rx) = mgr.register(Uuid::new_v4(), UserRole::Student, "S".to_string());

        mgr.handle_inbound(&handle.id, "{\"type\":\"nope\"}").await;
        assert!(matches!(
            rx.recv().await.unwrap(),
            OutboundMessage::Error { .. }
        ));
    }

    #[tokio::test]
    async fn test_unregister_cleans_rooms() {
        let mgr = manager();
        let user = Uuid::new_v4();
        let (handle, mut rx) = mgr.register(user, UserRole::Student, "Sam".to_string());

        mgr.unregister(&handle.id);
        assert_eq!(mgr.connection_count(), 0);

        mgr.send_to_user(user, &OutboundMessage::Ping { timestamp: 9 });
        assert!(rx.try_recv().is_err());
    }
}
