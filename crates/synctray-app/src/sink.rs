//! Log-backed presentation sink
//!
//! Renders every tray push as a structured tracing event instead of driving
//! a real tray widget. This is the front-end used for running the engine
//! headless against a live daemon feed; a graphical shell provides its own
//! `IPresentationSink` implementation.

use async_trait::async_trait;
use synctray_core::domain::{IconFrame, IconTheme, WatchRoot};
use synctray_core::ports::{IPresentationSink, Notification};
use tracing::{debug, info};

/// Presentation sink that writes tray state to the log
///
/// Icon pushes are logged at debug because the animator emits them at the
/// frame interval; user-facing text and notifications are logged at info.
pub struct LogPresentationSink {
    /// Theme hint from configuration, recorded with each icon push
    theme: IconTheme,
}

impl LogPresentationSink {
    pub fn new(theme: IconTheme) -> Self {
        Self { theme }
    }
}

#[async_trait]
impl IPresentationSink for LogPresentationSink {
    async fn set_icon(&self, frame: IconFrame) -> anyhow::Result<()> {
        debug!(asset = %frame.asset_name(), theme = %self.theme, "Tray icon updated");
        Ok(())
    }

    async fn set_watched_folders(&self, roots: &[WatchRoot]) -> anyhow::Result<()> {
        let folders: Vec<String> = roots.iter().map(|r| r.to_string()).collect();
        info!(count = folders.len(), folders = ?folders, "Watched folder list updated");
        Ok(())
    }

    async fn set_status_text(&self, text: &str) -> anyhow::Result<()> {
        info!(status = text, "Status text updated");
        Ok(())
    }

    async fn show_notification(&self, notification: &Notification) -> anyhow::Result<()> {
        info!(
            subject = %notification.subject,
            message = %notification.message,
            "Desktop notification"
        );
        Ok(())
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        debug!("Presentation sink disposed");
        Ok(())
    }
}
