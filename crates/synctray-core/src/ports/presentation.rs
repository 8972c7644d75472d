//! Presentation sink port (driven/secondary port)
//!
//! This module defines the interface through which the status engine drives
//! the user-visible tray surface: the icon, the tooltip/status text, the
//! watched-folder list, and desktop notifications. Implementations may wrap
//! a GTK status icon, an AppIndicator, or a plain log sink for headless use.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because rendering failures are adapter-specific.
//! - Callers run on arbitrary tokio workers; implementations backed by a
//!   UI toolkit must marshal each call onto their own UI thread.
//! - A failed call is never fatal to the engine. Callers log the error and
//!   continue, so implementations should not panic on transient failures.

use serde::{Deserialize, Serialize};

use crate::domain::icon::IconFrame;
use crate::domain::watch::WatchRoot;

// ============================================================================
// Notification struct
// ============================================================================

/// A desktop notification produced by the status engine
///
/// Carries only content; urgency and display duration are left to the
/// presentation implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short headline, e.g. `"report.pdf added"`
    pub subject: String,
    /// Body text with details about the change
    pub message: String,
}

impl Notification {
    /// Creates a new notification with the given subject and message
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// IPresentationSink trait
// ============================================================================

/// Port trait for the user-visible tray surface
///
/// The engine calls these methods from its animation task and from event
/// dispatch, concurrently. Implementations must serialize access to their
/// underlying toolkit themselves.
///
/// ## Implementation Notes
///
/// - `set_icon` replaces the current tray image; redundant frames are not
///   filtered by the engine during animation, so implementations that care
///   should debounce.
/// - `set_watched_folders` replaces the folder list shown in the tray menu.
/// - `dispose` tears down the surface; no calls follow it.
#[async_trait::async_trait]
pub trait IPresentationSink: Send + Sync {
    /// Replaces the tray icon with the given frame
    async fn set_icon(&self, frame: IconFrame) -> anyhow::Result<()>;

    /// Replaces the watched-folder list shown to the user
    async fn set_watched_folders(&self, roots: &[WatchRoot]) -> anyhow::Result<()>;

    /// Replaces the status/tooltip text
    async fn set_status_text(&self, text: &str) -> anyhow::Result<()>;

    /// Shows a one-shot desktop notification
    async fn show_notification(&self, notification: &Notification) -> anyhow::Result<()>;

    /// Tears down the tray surface on shutdown
    async fn dispose(&self) -> anyhow::Result<()>;
}
