//! Shared traits implemented across ShuttleHub crates.

pub mod cache;

pub use cache::CacheProvider;
