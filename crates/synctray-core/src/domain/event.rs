//! Daemon event catalogue
//!
//! Every message the synchronization daemon publishes to the tray is one of
//! these variants. The wire form is a tagged JSON object:
//!
//! ```json
//! {"event": "up_index_start", "file_count": 4}
//! ```
//!
//! Field names follow the daemon's wire contract; the dispatcher only ever
//! consumes the fields listed here, so unknown extra fields are ignored by
//! serde's default behavior.

use serde::{Deserialize, Serialize};

use super::changeset::ChangeSet;
use super::watch::{Watch, WatchRoot};

/// An inbound event from the synchronization daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DaemonEvent {
    /// The daemon restarted or reloaded its configuration; the current
    /// watch list must be requested again
    DaemonReloaded,

    /// Snapshot of every watched folder and its current status
    WatchListResponse { watches: Vec<Watch> },

    /// Remote changes were detected for a root (download about to begin)
    DownChangesDetected { root: WatchRoot },

    /// Local index changes were detected for a root (upload about to begin)
    UpIndexChangesDetected { root: WatchRoot },

    /// A synchronization pass for a root finished
    WatchEnd { root: WatchRoot },

    /// Indexing and upload is starting
    UpStart,

    /// Indexing began over the given number of new or altered files
    UpIndexStart { file_count: u64 },

    /// A single file upload began
    UpUploadFile { filename: String },

    /// Progress within a multi-file upload transaction
    UpUploadFileInTransaction {
        current_file_index: u64,
        total_file_count: u64,
        current_file_size: u64,
        total_file_size: u64,
    },

    /// The upload phase finished
    UpEnd,

    /// A single download step began
    DownDownloadFile {
        file_description: String,
        current_file_index: u64,
        max_file_count: u64,
    },

    /// The download phase is starting
    DownStart,

    /// The download phase finished, with the set of files it touched
    DownEnd { root: WatchRoot, changes: ChangeSet },
}

impl DaemonEvent {
    /// Wire tag of this event, for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DaemonEvent::DaemonReloaded => "daemon_reloaded",
            DaemonEvent::WatchListResponse { .. } => "watch_list_response",
            DaemonEvent::DownChangesDetected { .. } => "down_changes_detected",
            DaemonEvent::UpIndexChangesDetected { .. } => "up_index_changes_detected",
            DaemonEvent::WatchEnd { .. } => "watch_end",
            DaemonEvent::UpStart => "up_start",
            DaemonEvent::UpIndexStart { .. } => "up_index_start",
            DaemonEvent::UpUploadFile { .. } => "up_upload_file",
            DaemonEvent::UpUploadFileInTransaction { .. } => "up_upload_file_in_transaction",
            DaemonEvent::UpEnd => "up_end",
            DaemonEvent::DownDownloadFile { .. } => "down_download_file",
            DaemonEvent::DownStart => "down_start",
            DaemonEvent::DownEnd { .. } => "down_end",
        }
    }
}
