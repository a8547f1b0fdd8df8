//! Shuttle read and administrative operations.

pub mod service;

pub use service::{ShuttleService, ShuttleView};
