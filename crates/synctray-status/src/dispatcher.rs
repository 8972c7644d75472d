//! Daemon event dispatch - one inbound event, one engine action
//!
//! The [`EventDispatcher`] is the single place where daemon events touch the
//! rest of the engine. Per event kind:
//!
//! - `DaemonReloaded` requests a fresh watch list over [`IDaemonControl`]
//! - `WatchListResponse` resets the aggregator, pushes the folder list, and
//!   pushes the in-sync icon when nothing is syncing
//! - `DownChangesDetected` / `UpIndexChangesDetected` raise a root's flag,
//!   `WatchEnd` lowers it
//! - upload and download progress events render one-line status texts
//! - `DownEnd` turns a non-empty change-set into a desktop notification
//!
//! Handlers may run concurrently on arbitrary tokio workers; the aggregator
//! serializes flag updates internally and the upload counter sits behind its
//! own lock. Sink and control failures are logged and swallowed so one bad
//! push never wedges dispatch for subsequent events.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use synctray_core::domain::{DaemonEvent, Watch, WatchRoot};
use synctray_core::domain::{ChangeSet, IconFrame};
use synctray_core::ports::{IDaemonControl, IPresentationSink, Notification};

use crate::aggregator::SyncStatusAggregator;
use crate::progress::{format_bytes, UploadProgress};
use crate::summary::summarize_changes;

// ============================================================================
// EventDispatcher
// ============================================================================

/// Maps inbound daemon events onto aggregator updates and sink pushes
pub struct EventDispatcher {
    /// Shared per-root status table
    aggregator: Arc<SyncStatusAggregator>,
    /// Tray surface receiving text, folder list, and notification pushes
    sink: Arc<dyn IPresentationSink>,
    /// Outbound channel back to the daemon
    daemon: Arc<dyn IDaemonControl>,
    /// Running byte total for the current upload transaction
    upload: Mutex<UploadProgress>,
}

impl EventDispatcher {
    /// Creates a dispatcher over the given aggregator, sink, and control port
    pub fn new(
        aggregator: Arc<SyncStatusAggregator>,
        sink: Arc<dyn IPresentationSink>,
        daemon: Arc<dyn IDaemonControl>,
    ) -> Self {
        Self {
            aggregator,
            sink,
            daemon,
            upload: Mutex::new(UploadProgress::new()),
        }
    }

    /// Applies one daemon event to the engine
    pub async fn handle(&self, event: DaemonEvent) {
        debug!(event = event.name(), "Dispatching daemon event");

        match event {
            DaemonEvent::DaemonReloaded => {
                if let Err(e) = self.daemon.request_watch_list().await {
                    warn!(error = %e, "Failed to request watch list");
                }
            }

            DaemonEvent::WatchListResponse { watches } => {
                self.on_watch_list(watches).await;
            }

            DaemonEvent::DownChangesDetected { root }
            | DaemonEvent::UpIndexChangesDetected { root } => {
                self.aggregator.set_status(root, true);
            }

            DaemonEvent::WatchEnd { root } => {
                self.aggregator.set_status(root, false);
            }

            DaemonEvent::UpStart => {
                self.set_status_text("Starting indexing and upload ...").await;
            }

            DaemonEvent::UpIndexStart { file_count } => {
                self.set_status_text(&format!(
                    "Indexing {file_count} new or altered file(s)..."
                ))
                .await;
            }

            DaemonEvent::UpUploadFile { filename } => {
                self.set_status_text(&format!("Uploading {filename} ...")).await;
            }

            DaemonEvent::UpUploadFileInTransaction {
                current_file_index,
                total_file_count,
                current_file_size,
                total_file_size,
            } => {
                self.on_upload_in_transaction(
                    current_file_index,
                    total_file_count,
                    current_file_size,
                    total_file_size,
                )
                .await;
            }

            // The upload settle is reflected by WatchEnd; nothing to render
            DaemonEvent::UpEnd => {}

            DaemonEvent::DownDownloadFile {
                file_description,
                current_file_index,
                max_file_count,
            } => {
                self.set_status_text(&format!(
                    "Downloading {file_description} {current_file_index}/{max_file_count} ..."
                ))
                .await;
            }

            DaemonEvent::DownStart => {
                self.set_status_text("Checking for remote changes ...").await;
            }

            DaemonEvent::DownEnd { root, changes } => {
                self.on_down_end(root, changes).await;
            }
        }
    }

    /// Applies a watch-list snapshot: reset, folder list, then idle icon
    ///
    /// The idle icon is pushed here (not left to the animator) so a
    /// just-learned idle state shows immediately instead of waiting for the
    /// next animation tick.
    async fn on_watch_list(&self, watches: Vec<Watch>) {
        debug!(watch_count = watches.len(), "Watch list received");

        self.aggregator.reset_all(&watches);

        let roots: Vec<WatchRoot> = watches.into_iter().map(|w| w.root).collect();
        if let Err(e) = self.sink.set_watched_folders(&roots).await {
            warn!(error = %e, "Failed to push watched folder list");
        }

        if !self.aggregator.is_any_syncing() {
            self.push_icon(IconFrame::InSync).await;
        }
    }

    /// Renders one upload-transaction progress line
    ///
    /// The running total counts completed files only, so the current file's
    /// size is added after the line is rendered.
    async fn on_upload_in_transaction(
        &self,
        current_file_index: u64,
        total_file_count: u64,
        current_file_size: u64,
        total_file_size: u64,
    ) {
        let mut upload = self.upload.lock().await;

        // Index 1 (or a defensive 0) marks the start of a new batch
        if current_file_index <= 1 {
            upload.reset();
        }

        let uploaded = format_bytes(upload.uploaded_bytes());
        let percent = upload.percent_of(total_file_size);
        self.set_status_text(&format!(
            "Uploading {current_file_index}/{total_file_count} ({uploaded} / {percent}%) ..."
        ))
        .await;

        upload.add(current_file_size);
    }

    /// Turns a completed download's change-set into a notification
    async fn on_down_end(&self, root: WatchRoot, changes: ChangeSet) {
        if !changes.has_changes() {
            return;
        }
        if let Some(notification) = summarize_changes(&changes, &root.display_name()) {
            self.show_notification(&notification).await;
        }
    }

    /// Push status text, swallowing sink errors with a warning
    async fn set_status_text(&self, text: &str) {
        if let Err(e) = self.sink.set_status_text(text).await {
            warn!(error = %e, "Failed to push status text");
        }
    }

    /// Push an icon frame, swallowing sink errors with a warning
    async fn push_icon(&self, frame: IconFrame) {
        if let Err(e) = self.sink.set_icon(frame).await {
            warn!(error = %e, frame = %frame, "Failed to push tray icon");
        }
    }

    /// Show a notification, swallowing sink errors with a warning
    async fn show_notification(&self, notification: &Notification) {
        if let Err(e) = self.sink.show_notification(notification).await {
            warn!(error = %e, subject = %notification.subject, "Failed to show notification");
        }
    }
}

// ============================================================================
// Unit tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use synctray_core::domain::SyncStatus;

    use super::*;

    /// Recorded sink call
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SinkCall {
        Icon(IconFrame),
        Folders(Vec<WatchRoot>),
        StatusText(String),
        Notify(Notification),
    }

    /// In-memory sink recording every push
    struct RecordingSink {
        calls: StdMutex<Vec<SinkCall>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<SinkCall> {
            self.calls.lock().unwrap().clone()
        }

        fn status_texts(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    SinkCall::StatusText(t) => Some(t),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, call: SinkCall) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("sink down");
            }
            self.calls.lock().unwrap().push(call);
            Ok(())
        }
    }

    #[async_trait]
    impl IPresentationSink for RecordingSink {
        async fn set_icon(&self, frame: IconFrame) -> anyhow::Result<()> {
            self.record(SinkCall::Icon(frame))
        }

        async fn set_watched_folders(&self, roots: &[WatchRoot]) -> anyhow::Result<()> {
            self.record(SinkCall::Folders(roots.to_vec()))
        }

        async fn set_status_text(&self, text: &str) -> anyhow::Result<()> {
            self.record(SinkCall::StatusText(text.to_string()))
        }

        async fn show_notification(&self, notification: &Notification) -> anyhow::Result<()> {
            self.record(SinkCall::Notify(notification.clone()))
        }

        async fn dispose(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    /// Counts watch-list requests
    struct RecordingControl {
        requests: AtomicU32,
    }

    impl RecordingControl {
        fn new() -> Self {
            Self {
                requests: AtomicU32::new(0),
            }
        }

        fn request_count(&self) -> u32 {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IDaemonControl for RecordingControl {
        async fn request_watch_list(&self) -> anyhow::Result<()> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Harness {
        aggregator: Arc<SyncStatusAggregator>,
        sink: Arc<RecordingSink>,
        control: Arc<RecordingControl>,
        dispatcher: EventDispatcher,
    }

    fn harness() -> Harness {
        harness_with_sink(RecordingSink::new())
    }

    fn harness_with_sink(sink: RecordingSink) -> Harness {
        let aggregator = Arc::new(SyncStatusAggregator::new());
        let sink = Arc::new(sink);
        let control = Arc::new(RecordingControl::new());
        let dispatcher = EventDispatcher::new(
            aggregator.clone(),
            sink.clone() as Arc<dyn IPresentationSink>,
            control.clone() as Arc<dyn IDaemonControl>,
        );
        Harness {
            aggregator,
            sink,
            control,
            dispatcher,
        }
    }

    fn root(path: &str) -> WatchRoot {
        WatchRoot::new(path)
    }

    #[tokio::test]
    async fn test_daemon_reloaded_requests_watch_list_once() {
        let h = harness();
        h.dispatcher.handle(DaemonEvent::DaemonReloaded).await;
        assert_eq!(h.control.request_count(), 1);
    }

    #[tokio::test]
    async fn test_watch_list_resets_then_folders_then_idle_icon() {
        let h = harness();
        h.aggregator.set_status(root("/stale"), true);

        h.dispatcher
            .handle(DaemonEvent::WatchListResponse {
                watches: vec![
                    Watch::new(root("/docs"), SyncStatus::Idle),
                    Watch::new(root("/photos"), SyncStatus::Idle),
                ],
            })
            .await;

        assert!(!h.aggregator.is_any_syncing());
        assert_eq!(
            h.sink.calls(),
            vec![
                SinkCall::Folders(vec![root("/docs"), root("/photos")]),
                SinkCall::Icon(IconFrame::InSync),
            ]
        );
    }

    #[tokio::test]
    async fn test_watch_list_with_syncing_root_skips_idle_icon() {
        let h = harness();

        h.dispatcher
            .handle(DaemonEvent::WatchListResponse {
                watches: vec![Watch::new(root("/docs"), SyncStatus::Syncing)],
            })
            .await;

        assert!(h.aggregator.is_any_syncing());
        assert_eq!(h.sink.calls(), vec![SinkCall::Folders(vec![root("/docs")])]);
    }

    #[tokio::test]
    async fn test_change_events_raise_flag_and_watch_end_lowers_it() {
        let h = harness();

        h.dispatcher
            .handle(DaemonEvent::DownChangesDetected { root: root("/docs") })
            .await;
        assert!(h.aggregator.is_any_syncing());

        h.dispatcher
            .handle(DaemonEvent::WatchEnd { root: root("/docs") })
            .await;
        assert!(!h.aggregator.is_any_syncing());

        h.dispatcher
            .handle(DaemonEvent::UpIndexChangesDetected { root: root("/docs") })
            .await;
        assert!(h.aggregator.is_any_syncing());

        // Flag events go straight to the aggregator, never to the sink
        assert!(h.sink.calls().is_empty());
    }

    #[tokio::test]
    async fn test_simple_status_texts() {
        let h = harness();

        h.dispatcher.handle(DaemonEvent::UpStart).await;
        h.dispatcher
            .handle(DaemonEvent::UpIndexStart { file_count: 4 })
            .await;
        h.dispatcher
            .handle(DaemonEvent::UpUploadFile {
                filename: "report.pdf".to_string(),
            })
            .await;
        h.dispatcher.handle(DaemonEvent::DownStart).await;
        h.dispatcher
            .handle(DaemonEvent::DownDownloadFile {
                file_description: "database version".to_string(),
                current_file_index: 2,
                max_file_count: 7,
            })
            .await;

        assert_eq!(
            h.sink.status_texts(),
            vec![
                "Starting indexing and upload ...",
                "Indexing 4 new or altered file(s)...",
                "Uploading report.pdf ...",
                "Checking for remote changes ...",
                "Downloading database version 2/7 ...",
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_transaction_running_total() {
        let h = harness();

        for (index, size) in [(1, 1024), (2, 2048), (3, 1024)] {
            h.dispatcher
                .handle(DaemonEvent::UpUploadFileInTransaction {
                    current_file_index: index,
                    total_file_count: 3,
                    current_file_size: size,
                    total_file_size: 4096,
                })
                .await;
        }

        assert_eq!(
            h.sink.status_texts(),
            vec![
                "Uploading 1/3 (0 bytes / 0%) ...",
                "Uploading 2/3 (1.0 KB / 25%) ...",
                "Uploading 3/3 (3.0 KB / 75%) ...",
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_transaction_resets_on_new_batch() {
        let h = harness();

        h.dispatcher
            .handle(DaemonEvent::UpUploadFileInTransaction {
                current_file_index: 1,
                total_file_count: 2,
                current_file_size: 500,
                total_file_size: 1000,
            })
            .await;
        h.dispatcher
            .handle(DaemonEvent::UpUploadFileInTransaction {
                current_file_index: 2,
                total_file_count: 2,
                current_file_size: 500,
                total_file_size: 1000,
            })
            .await;

        // New batch: index goes back to 1, running total starts over
        h.dispatcher
            .handle(DaemonEvent::UpUploadFileInTransaction {
                current_file_index: 1,
                total_file_count: 5,
                current_file_size: 100,
                total_file_size: 200,
            })
            .await;

        assert_eq!(
            h.sink.status_texts(),
            vec![
                "Uploading 1/2 (0 bytes / 0%) ...",
                "Uploading 2/2 (500 bytes / 50%) ...",
                "Uploading 1/5 (0 bytes / 0%) ...",
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_transaction_zero_total_size_is_zero_percent() {
        let h = harness();

        h.dispatcher
            .handle(DaemonEvent::UpUploadFileInTransaction {
                current_file_index: 1,
                total_file_count: 1,
                current_file_size: 4096,
                total_file_size: 0,
            })
            .await;
        h.dispatcher
            .handle(DaemonEvent::UpUploadFileInTransaction {
                current_file_index: 2,
                total_file_count: 2,
                current_file_size: 0,
                total_file_size: 0,
            })
            .await;

        assert_eq!(
            h.sink.status_texts(),
            vec![
                "Uploading 1/1 (0 bytes / 0%) ...",
                "Uploading 2/2 (4.0 KB / 0%) ...",
            ]
        );
    }

    #[tokio::test]
    async fn test_up_end_is_a_no_op() {
        let h = harness();
        h.dispatcher.handle(DaemonEvent::UpEnd).await;
        assert!(h.sink.calls().is_empty());
        assert!(!h.aggregator.is_any_syncing());
    }

    #[tokio::test]
    async fn test_down_end_with_changes_notifies() {
        let h = harness();

        h.dispatcher
            .handle(DaemonEvent::DownEnd {
                root: root("/home/alice/Documents"),
                changes: ChangeSet::new().with_added("report.pdf"),
            })
            .await;

        assert_eq!(
            h.sink.calls(),
            vec![SinkCall::Notify(Notification::new(
                "report.pdf added",
                "File 'report.pdf' was added to your folder 'Documents'",
            ))]
        );
    }

    #[tokio::test]
    async fn test_down_end_without_changes_is_silent() {
        let h = harness();

        h.dispatcher
            .handle(DaemonEvent::DownEnd {
                root: root("/home/alice/Documents"),
                changes: ChangeSet::new(),
            })
            .await;

        assert!(h.sink.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failures_do_not_poison_dispatch() {
        let h = harness_with_sink(RecordingSink::failing());

        h.dispatcher.handle(DaemonEvent::UpStart).await;
        h.dispatcher
            .handle(DaemonEvent::WatchListResponse {
                watches: vec![Watch::new(root("/docs"), SyncStatus::Syncing)],
            })
            .await;
        h.dispatcher
            .handle(DaemonEvent::WatchEnd { root: root("/docs") })
            .await;

        // Sink pushes all failed, but state kept moving
        assert!(!h.aggregator.is_any_syncing());
        assert!(h.sink.calls().is_empty());
    }
}
