//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use shuttlehub_entity::user::UserRole;

use crate::message::types::OutboundMessage;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// A handle to a single WebSocket connection.
///
/// Holds the sender half of the outbound message buffer, plus metadata
/// about the connected user.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// User who owns this connection.
    pub user_id: Uuid,
    /// User's role (cached for room permission checks).
    pub role: UserRole,
    /// Display name (cached from the token claims).
    pub name: String,
    /// Sender for outbound messages.
    sender: mpsc::Sender<OutboundMessage>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Last pong received.
    pub last_pong: tokio::sync::RwLock<DateTime<Utc>>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Creates a new connection handle.
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        name: String,
        sender: mpsc::Sender<OutboundMessage>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            name,
            sender,
            connected_at: now,
            last_pong: tokio::sync::RwLock::new(now),
            alive: AtomicBool::new(true),
        }
    }

    /// Queues an outbound message for this connection.
    ///
    /// Delivery is at-most-once: a full or closed buffer drops the message.
    pub fn send(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Checks if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Marks the connection as closed.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Records a pong response.
    pub async fn record_pong(&self) {
        let mut lp = self.last_pong.write().await;
        *lp = Utc::now();
    }
}
