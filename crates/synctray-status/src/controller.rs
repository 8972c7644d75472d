//! Tray controller - engine lifecycle around the aggregator and animator
//!
//! The [`TrayController`] wires the pieces together and owns their
//! lifecycle:
//!
//! 1. `start` pushes the neutral startup icon and spawns the
//!    [`IconAnimator`](super::animator::IconAnimator) on a child token.
//! 2. `run` pumps daemon events from a channel into the
//!    [`EventDispatcher`](super::dispatcher::EventDispatcher) until the
//!    stream ends or shutdown is signalled.
//! 3. `shutdown` cancels the animator, joins it, and disposes the sink.
//!
//! The application owns the cancellation token, so an external signal
//! handler can stop the controller the same way a closed event stream does.

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use synctray_core::config::TrayConfig;
use synctray_core::domain::{DaemonEvent, IconFrame};
use synctray_core::ports::{IDaemonControl, IPresentationSink};

use crate::aggregator::SyncStatusAggregator;
use crate::animator::IconAnimator;
use crate::dispatcher::EventDispatcher;

// ============================================================================
// TrayController
// ============================================================================

/// Owns the status engine's moving parts for the process lifetime
pub struct TrayController {
    /// Shared per-root status table, handed to dispatcher and animator
    aggregator: Arc<SyncStatusAggregator>,
    /// Tray surface, also disposed on shutdown
    sink: Arc<dyn IPresentationSink>,
    /// Event-to-action mapping
    dispatcher: EventDispatcher,
    /// Token for signalling graceful shutdown to the animator and `run`
    shutdown: CancellationToken,
    /// Handle of the spawned animator task, joined on shutdown
    animator: Option<JoinHandle<()>>,
    /// Delay between animation frames while syncing
    frame_interval: Duration,
    /// Delay between flag polls while idle
    idle_poll_interval: Duration,
}

impl TrayController {
    /// Creates a controller over the given sink and daemon control port
    ///
    /// # Arguments
    /// * `sink` - Presentation surface for icons, text, and notifications
    /// * `daemon` - Outbound channel back to the synchronization daemon
    /// * `config` - Animation cadence settings
    /// * `shutdown` - Application-owned token observed by all engine tasks
    pub fn new(
        sink: Arc<dyn IPresentationSink>,
        daemon: Arc<dyn IDaemonControl>,
        config: &TrayConfig,
        shutdown: CancellationToken,
    ) -> Self {
        let aggregator = Arc::new(SyncStatusAggregator::new());
        let dispatcher = EventDispatcher::new(aggregator.clone(), sink.clone(), daemon);

        Self {
            aggregator,
            sink,
            dispatcher,
            shutdown,
            animator: None,
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            idle_poll_interval: Duration::from_millis(config.idle_poll_interval_ms),
        }
    }

    /// Pushes the neutral startup icon and spawns the animation loop
    ///
    /// Called once; `run` calls it implicitly when needed.
    pub async fn start(&mut self) {
        if self.animator.is_some() {
            return;
        }

        if let Err(e) = self.sink.set_icon(IconFrame::NoOverlay).await {
            warn!(error = %e, "Failed to push startup icon");
        }

        let animator = IconAnimator::new(
            self.aggregator.clone(),
            self.sink.clone(),
            self.frame_interval,
            self.idle_poll_interval,
            self.shutdown.child_token(),
        );
        self.animator = Some(tokio::spawn(animator.run()));

        info!("Tray controller started");
    }

    /// Applies one daemon event
    pub async fn handle(&self, event: DaemonEvent) {
        self.dispatcher.handle(event).await;
    }

    /// Pumps daemon events into the dispatcher until the stream closes or
    /// shutdown is signalled
    pub async fn run(&mut self, mut events: mpsc::Receiver<DaemonEvent>) {
        self.start().await;

        loop {
            tokio::select! {
                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => self.dispatcher.handle(event).await,
                        None => {
                            info!("Event stream closed");
                            break;
                        }
                    }
                }
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }
    }

    /// Stops the animator, joins it, and disposes the sink
    pub async fn shutdown(&mut self) {
        info!("Tray controller shutting down");
        self.shutdown.cancel();

        if let Some(handle) = self.animator.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Icon animator task panicked");
            }
        }

        if let Err(e) = self.sink.dispose().await {
            warn!(error = %e, "Failed to dispose presentation sink");
        }

        info!("Tray controller stopped");
    }
}

// ============================================================================
// Unit tests
// ============================================================================
