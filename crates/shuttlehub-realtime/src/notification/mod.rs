//! Realtime push routing for domain events.

pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;
