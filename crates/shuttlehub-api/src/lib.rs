//! # shuttlehub-api
//!
//! HTTP API layer for ShuttleHub built on Axum: router, shared state,
//! error-to-HTTP mapping, request extractors, DTOs, and the WebSocket
//! upgrade endpoint.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
