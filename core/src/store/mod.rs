//! SQLite-backed record store for agent rows.
//!
//! - [`db`] — connection handling, versioned schema, CRUD operations
//! - [`error`] — the store's typed failure taxonomy
//! - [`seed`] — the fixed records inserted on first run

pub mod db;
pub mod error;
pub mod seed;

pub use db::{AgentStore, SCHEMA_VERSION};
pub use error::StoreError;
