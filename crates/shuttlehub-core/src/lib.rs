//! # shuttlehub-core
//!
//! Core crate for the ShuttleHub campus transport platform. Contains
//! configuration schemas, the unified error system, and shared traits.
//!
//! This crate has **no** internal dependencies on other ShuttleHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
