//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::info;

use shuttlehub_core::config::realtime::RealtimeConfig;

use crate::connection::manager::ConnectionManager;
use crate::notification::dispatcher::NotificationDispatcher;
use crate::room::RoomRegistry;

/// Central real-time engine coordinating connections, rooms, and push.
///
/// Constructed once at startup and passed by reference to every component
/// that needs to publish; there is no global mutable hub.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Room registry.
    pub rooms: Arc<RoomRegistry>,
    /// Event dispatcher (implements the service layer's publisher port).
    pub events: Arc<NotificationDispatcher>,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine").finish()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine and starts its keepalive loop.
    pub fn new(config: &RealtimeConfig) -> Self {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

        let rooms = Arc::new(RoomRegistry::new());
        let connections = Arc::new(ConnectionManager::new(config.clone(), Arc::clone(&rooms)));
        let events = Arc::new(NotificationDispatcher::new(Arc::clone(&connections)));

        let ping_connections = Arc::clone(&connections);
        let ping_interval = Duration::from_secs(config.ping_interval_seconds);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ping_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        ping_connections.ping_all();
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        info!("Realtime engine initialized");

        Self {
            connections,
            rooms,
            events,
            shutdown_tx,
        }
    }

    /// Stops the keepalive loop and closes every connection.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
        self.connections.close_all();
        info!("Realtime engine shut down");
    }
}
