//! AgentDesk terminal UI.
//!
//! Two screens over the core roster: a list of all agents and a detail form
//! for adding or editing one. Navigation is a small state machine with a
//! back-stack; all storage work happens on the roster's worker thread, so
//! the UI loop never blocks on the database.
//!
//! # Modules
//!
//! - [`app`] — view state machine, key routing, status messages
//! - [`form`] — cursor-aware field editor and the six-field detail form
//! - [`list_view`] — agent table rendering
//! - [`detail_view`] — detail form rendering
//! - [`tui`] — terminal setup and the main event loop

pub mod app;
pub mod detail_view;
pub mod form;
pub mod list_view;
pub mod tui;
