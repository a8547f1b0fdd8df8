//! # shuttlehub-service
//!
//! Business logic services for ShuttleHub. The booking service is the
//! orchestrator: it composes the seat ledger, the booking state machine,
//! and the notification side effects inside a single unit of work per
//! operation. Services publish realtime events through the
//! [`events::EventPublisher`] port so they stay decoupled from the
//! WebSocket engine.

pub mod booking;
pub mod context;
pub mod events;
pub mod notification;
pub mod shuttle;

pub use context::RequestContext;
