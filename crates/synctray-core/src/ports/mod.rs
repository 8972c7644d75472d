//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the status engine
//! depends on, but whose implementations live in the application crate
//! (or in tests, as recording fakes).
//!
//! ## Ports Overview
//!
//! - [`IPresentationSink`] - Tray icon, status text, and notification output
//! - [`IDaemonControl`] - Requests sent back to the synchronization daemon

pub mod daemon_control;
pub mod presentation;

pub use daemon_control::IDaemonControl;
pub use presentation::{IPresentationSink, Notification};
