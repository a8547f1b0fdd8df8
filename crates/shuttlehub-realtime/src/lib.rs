//! # shuttlehub-realtime
//!
//! WebSocket real-time engine for ShuttleHub. Maintains per-user and
//! per-shuttle rooms over persistent connections and delivers best-effort,
//! at-most-once push events. Durable notification state lives in the
//! database; a disconnected recipient simply misses the push.

pub mod connection;
pub mod engine;
pub mod message;
pub mod notification;
pub mod room;

pub use engine::RealtimeEngine;
