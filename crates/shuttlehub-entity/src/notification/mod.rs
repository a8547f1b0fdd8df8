//! Notification domain entities.

pub mod kind;
pub mod model;

pub use kind::{NotificationKind, NotificationRef};
pub use model::Notification;
