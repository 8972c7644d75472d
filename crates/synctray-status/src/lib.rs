//! SyncTray Status - aggregation and presentation engine
//!
//! Provides:
//! - Per-root sync status folded into one global "anything syncing" flag
//! - Tray icon animation driven by that flag
//! - Daemon event dispatch (status texts, folder list, notifications)
//! - Lifecycle control with graceful shutdown
//!
//! ## Modules
//!
//! - [`aggregator`] - Thread-safe status table with a published global flag
//! - [`animator`] - Background loop rotating icon frames while syncing
//! - [`dispatcher`] - Maps inbound daemon events onto engine actions
//! - [`summary`] - Change-set to notification wording
//! - [`progress`] - Upload running-total bookkeeping
//! - [`controller`] - Startup push, event pump, shutdown ordering

pub mod aggregator;
pub mod animator;
pub mod controller;
pub mod dispatcher;
pub mod progress;
pub mod summary;
