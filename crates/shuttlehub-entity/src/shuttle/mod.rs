//! Shuttle domain entities.

pub mod model;

pub use model::Shuttle;
