//! Connection pool — tracks all active connections indexed by user ID.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::handle::{ConnectionHandle, ConnectionId};

/// Thread-safe pool of all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionPool {
    /// User ID → list of connection handles (one user can have multiple connections).
    by_user: DashMap<Uuid, Vec<Arc<ConnectionHandle>>>,
    /// Connection ID → connection handle for direct lookup.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// Creates a new empty connection pool.
    pub fn new() -> Self {
        Self {
            by_user: DashMap::new(),
            by_id: DashMap::new(),
        }
    }

    /// Adds a connection to the pool.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_id.insert(handle.id, handle.clone());
        self.by_user.entry(handle.user_id).or_default().push(handle);
    }

    /// Removes a connection from the pool.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        if let Some((_, handle)) = self.by_id.remove(conn_id) {
            if let Some(mut connections) = self.by_user.get_mut(&handle.user_id) {
                connections.retain(|c| c.id != *conn_id);
                if connections.is_empty() {
                    drop(connections);
                    self.by_user.remove(&handle.user_id);
                }
            }
            Some(handle)
        } else {
            None
        }
    }

    /// Gets a specific connection by ID.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(conn_id).map(|entry| entry.value().clone())
    }

    /// Gets all connections for a user.
    pub fn user_connections(&self, user_id: &Uuid) -> Vec<Arc<ConnectionHandle>> {
        self.by_user
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Returns all connection handles.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns total number of active connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    /// Returns number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}

impl Default for ConnectionPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuttlehub_entity::user::UserRole;
    use tokio::sync::mpsc;

    fn handle(user_id: Uuid) -> Arc<ConnectionHandle> {
        let (tx, _rx) = mpsc::channel(8);
        Arc::new(ConnectionHandle::new(
            user_id,
            UserRole::Student,
            "Sam".to_string(),
            tx,
        ))
    }

    #[test]
    fn test_add_and_remove() {
        let pool = ConnectionPool::new();
        let user = Uuid::new_v4();
        let conn = handle(user);
        let conn_id = conn.id;

        pool.add(conn);
        assert_eq!(pool.connection_count(), 1);
        assert_eq!(pool.user_connections(&user).len(), 1);

        let removed = pool.remove(&conn_id).unwrap();
        assert_eq!(removed.id, conn_id);
        assert_eq!(pool.connection_count(), 0);
        assert_eq!(pool.user_count(), 0);
    }

    #[test]
    fn test_multiple_connections_per_user() {
        let pool = ConnectionPool::new();
        let user = Uuid::new_v4();
        let first = handle(user);
        let second = handle(user);
        let first_id = first.id;

        pool.add(first);
        pool.add(second);
        assert_eq!(pool.user_connections(&user).len(), 2);
        assert_eq!(pool.user_count(), 1);

        pool.remove(&first_id);
        assert_eq!(pool.user_connections(&user).len(), 1);
        assert_eq!(pool.user_count(), 1);
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let pool = ConnectionPool::new();
        assert!(pool.remove(&Uuid::new_v4()).is_none());
    }
}
