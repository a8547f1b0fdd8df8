//! # shuttlehub-database
//!
//! PostgreSQL connection management, migrations, and repository
//! implementations for ShuttleHub. Repositories are thin typed wrappers
//! around SQL; multi-entity units of work are composed by the service layer
//! on a single transaction.

pub mod connection;
pub mod migration;
pub mod repositories;
