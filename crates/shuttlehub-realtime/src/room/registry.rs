//! Room registry — manages all rooms and memberships.

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

use super::room::Room;
use super::subscription::SubscriptionTracker;

/// Registry of all active rooms.
///
/// Rooms are created on first join and dropped when their last member
/// leaves.
#[derive(Debug)]
pub struct RoomRegistry {
    /// Room name → Room.
    rooms: DashMap<String, Room>,
    /// Membership tracker (reverse index).
    subscriptions: SubscriptionTracker,
}

impl RoomRegistry {
    /// Creates a new room registry.
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            subscriptions: SubscriptionTracker::new(),
        }
    }

    /// Adds a connection to a room.
    pub fn join(&self, room_name: String, conn_id: ConnectionId) {
        self.rooms
            .entry(room_name.clone())
            .or_insert_with(|| Room::new(room_name.clone()))
            .join(conn_id);

        self.subscriptions.add(conn_id, room_name);
    }

    /// Removes a connection from a room.
    pub fn leave(&self, room_name: &str, conn_id: ConnectionId) {
        if let Some(mut room) = self.rooms.get_mut(room_name) {
            room.leave(conn_id);
            if room.is_empty() {
                drop(room);
                self.rooms.remove(room_name);
            }
        }
        self.subscriptions.remove(conn_id, room_name);
    }

    /// Removes a connection from all rooms.
    pub fn leave_all(&self, conn_id: ConnectionId) {
        let rooms = self.subscriptions.remove_all(conn_id);
        for room_name in &rooms {
            if let Some(mut room) = self.rooms.get_mut(room_name) {
                room.leave(conn_id);
                if room.is_empty() {
                    drop(room);
                    self.rooms.remove(room_name);
                }
            }
        }
    }

    /// Returns all member connection IDs for a room.
    pub fn members(&self, room_name: &str) -> Vec<ConnectionId> {
        self.rooms
            .get(room_name)
            .map(|room| room.member_ids())
            .unwrap_or_default()
    }

    /// Returns the membership count for a connection.
    pub fn membership_count(&self, conn_id: ConnectionId) -> usize {
        self.subscriptions.count(conn_id)
    }

    /// Returns member count for a room.
    pub fn room_member_count(&self, room_name: &str) -> usize {
        self.rooms
            .get(room_name)
            .map(|room| room.member_count())
            .unwrap_or(0)
    }

    /// Returns total number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_join_and_leave() {
        let registry = RoomRegistry::new();
        let conn = Uuid::new_v4();

        registry.join("shuttle:a".to_string(), conn);
        assert_eq!(registry.room_member_count("shuttle:a"), 1);
        assert_eq!(registry.membership_count(conn), 1);

        registry.leave("shuttle:a", conn);
        assert_eq!(registry.room_member_count("shuttle:a"), 0);
        // Empty rooms are dropped entirely.
        assert_eq!(registry.room_count(), 0);
    }

    #[test]
    fn test_leave_all_cleans_every_room() {
        let registry = RoomRegistry::new();
        let conn = Uuid::new_v4();
        let other = Uuid::new_v4();

        registry.join("user:x".to_string(), conn);
        registry.join("shuttle:y".to_string(), conn);
        registry.join("shuttle:y".to_string(), other);

        registry.leave_all(conn);

        assert_eq!(registry.membership_count(conn), 0);
        // The shared room survives with its remaining member.
        assert_eq!(registry.members("shuttle:y"), vec![other]);
        assert_eq!(registry.room_count(), 1);
    }

    #[test]
    fn test_concurrent_joins() {
        use std::sync::Arc;

        let registry = Arc::new(RoomRegistry::new());
        let conns: Vec<Uuid> = (0..32).map(|_| Uuid::new_v4()).collect();

        std::thread::scope(|scope| {
            for conn in &conns {
                let registry = Arc::clone(&registry);
                let conn = *conn;
                scope.spawn(move || {
                    registry.join("shuttle:contended".to_string(), conn);
                });
            }
        });

        assert_eq!(registry.room_member_count("shuttle:contended"), 32);
    }
}
