//! Domain entities and business logic
//!
//! This module contains the core domain types for SyncTray:
//! - Watched folder identifiers and status snapshots
//! - The daemon lifecycle event catalogue
//! - Change-sets produced by completed download cycles
//! - The tray icon frame catalogue and theme hint

pub mod changeset;
pub mod event;
pub mod icon;
pub mod watch;

// Re-export commonly used types
pub use changeset::ChangeSet;
pub use event::DaemonEvent;
pub use icon::{IconFrame, IconTheme};
pub use watch::{SyncStatus, Watch, WatchRoot};
