//! AgentDesk core — domain types, record store, and roster state.
//!
//! This crate contains everything below the terminal UI:
//!
//! - [`types`] — the `Agent` record and the editable `AgentDraft`
//! - [`store`] — SQLite-backed record store with a versioned schema
//! - [`validate`] — pre-persistence draft validation
//! - [`roster`] — the application state holder: a cached snapshot of all
//!   records plus a single-writer worker that serializes every mutation
//!   and its follow-up reload

pub mod roster;
pub mod store;
pub mod types;
pub mod validate;
