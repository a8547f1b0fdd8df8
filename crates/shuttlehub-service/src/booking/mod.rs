//! Booking orchestration.

pub mod service;
pub mod view;

pub use service::{BookingService, CreateBookingInput};
pub use view::BookingView;
