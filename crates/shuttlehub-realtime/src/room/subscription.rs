//! Subscription tracking — which connections are members of which rooms.

use std::collections::HashSet;

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

/// Tracks connection-to-room membership (reverse index).
#[derive(Debug)]
pub struct SubscriptionTracker {
    /// Connection ID → set of room names.
    conn_to_rooms: DashMap<ConnectionId, HashSet<String>>,
}

impl SubscriptionTracker {
    /// Creates a new subscription tracker.
    pub fn new() -> Self {
        Self {
            conn_to_rooms: DashMap::new(),
        }
    }

    /// Records a membership.
    pub fn add(&self, conn_id: ConnectionId, room: String) {
        self.conn_to_rooms.entry(conn_id).or_default().insert(room);
    }

    /// Removes a membership.
    pub fn remove(&self, conn_id: ConnectionId, room: &str) {
        if let Some(mut rooms) = self.conn_to_rooms.get_mut(&conn_id) {
            rooms.remove(room);
        }
    }

    /// Returns the number of rooms a connection is a member of.
    pub fn count(&self, conn_id: ConnectionId) -> usize {
        self.conn_to_rooms
            .get(&conn_id)
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }

    /// Removes all memberships for a connection.
    pub fn remove_all(&self, conn_id: ConnectionId) -> HashSet<String> {
        self.conn_to_rooms
            .remove(&conn_id)
            .map(|(_, rooms)| rooms)
            .unwrap_or_default()
    }
}

impl Default for SubscriptionTracker {
    fn default() -> Self {
        Self::new()
    }
}
