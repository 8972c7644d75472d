//! Icon animation loop driven by the aggregated syncing flag
//!
//! The [`IconAnimator`] owns the icon-push cadence for the whole process.
//! It alternates between two states:
//!
//! - **Quiescent**: polls [`is_any_syncing`](super::aggregator::SyncStatusAggregator::is_any_syncing)
//!   at the idle interval without pushing anything.
//! - **Animating**: rotates through the sync frames at the frame interval
//!   for as long as the flag stays up.
//!
//! On each true→false edge it pushes the static in-sync icon and the
//! "All files in sync" text exactly once, then returns to polling. Event
//! handlers never push icons during a sync, which keeps redundant pushes
//! out of the presentation layer.
//!
//! The loop runs until its cancellation token fires; every wait point
//! observes the token so shutdown never blocks on a sleeping animator.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use synctray_core::domain::IconFrame;
use synctray_core::ports::IPresentationSink;

use crate::aggregator::SyncStatusAggregator;

/// Status text pushed when the last syncing folder settles
const ALL_IN_SYNC_TEXT: &str = "All files in sync";

// ============================================================================
// IconAnimator
// ============================================================================

/// Background task that renders the aggregated syncing flag as icon frames
pub struct IconAnimator {
    /// Source of the global "anything syncing" flag
    aggregator: Arc<SyncStatusAggregator>,
    /// Where icon frames and the settle text go
    sink: Arc<dyn IPresentationSink>,
    /// Delay between animation frames while syncing
    frame_interval: Duration,
    /// Delay between flag polls while idle
    idle_poll_interval: Duration,
    /// Token for signalling graceful shutdown
    shutdown: CancellationToken,
}

impl IconAnimator {
    /// Creates a new animator
    ///
    /// # Arguments
    /// * `aggregator` - Shared status aggregator to poll
    /// * `sink` - Presentation sink receiving icon and text pushes
    /// * `frame_interval` - Delay between sync animation frames
    /// * `idle_poll_interval` - Delay between polls while idle
    /// * `shutdown` - Cancellation token observed at every wait point
    pub fn new(
        aggregator: Arc<SyncStatusAggregator>,
        sink: Arc<dyn IPresentationSink>,
        frame_interval: Duration,
        idle_poll_interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            aggregator,
            sink,
            frame_interval,
            idle_poll_interval,
            shutdown,
        }
    }

    /// Main animation loop
    ///
    /// Runs until the shutdown token fires. Intended to be spawned as a
    /// background task and joined on shutdown.
    pub async fn run(self) {
        info!(
            frame_ms = self.frame_interval.as_millis() as u64,
            idle_poll_ms = self.idle_poll_interval.as_millis() as u64,
            "Icon animator starting"
        );

        loop {
            // Quiescent: watch the flag without pushing anything
            while !self.aggregator.is_any_syncing() {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("Icon animator stopped");
                        return;
                    }
                    _ = sleep(self.idle_poll_interval) => {}
                }
            }

            // Animating: rotate frames for as long as the flag stays up
            let mut frame_index = 0;
            while self.aggregator.is_any_syncing() {
                let frame = IconFrame::sync_frame(frame_index);
                debug!(frame = %frame, "Advancing sync animation");
                self.push_icon(frame).await;

                frame_index = (frame_index + 1) % IconFrame::SYNC_FRAME_COUNT;

                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("Icon animator stopped");
                        return;
                    }
                    _ = sleep(self.frame_interval) => {}
                }
            }

            // One pair of pushes per true→false edge, then back to polling
            debug!("Sync settled, pushing in-sync icon");
            self.push_icon(IconFrame::InSync).await;
            self.set_status_text(ALL_IN_SYNC_TEXT).await;
        }
    }

    /// Push an icon frame, swallowing sink errors with a warning
    async fn push_icon(&self, frame: IconFrame) {
        if let Err(e) = self.sink.set_icon(frame).await {
            warn!(error = %e, frame = %frame, "Failed to push tray icon");
        }
    }

    /// Push status text, swallowing sink errors with a warning
    async fn set_status_text(&self, text: &str) {
        if let Err(e) = self.sink.set_status_text(text).await {
            warn!(error = %e, "Failed to push status text");
        }
    }
}

// ============================================================================
// Unit tests
// ============================================================================
