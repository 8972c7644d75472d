//! Watched folder types
//!
//! A *watch* is a folder under synchronization management, identified by its
//! absolute filesystem path. Watches are reported by the daemon; the tray
//! engine never creates or validates them, so construction is infallible and
//! unknown roots are accepted as-is.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ============================================================================
// WatchRoot
// ============================================================================

/// Identifier for a watched folder: its filesystem path
///
/// The path is treated as an opaque key. It is not required to exist locally
/// because the daemon may report folders on another machine or a detached
/// mount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchRoot(PathBuf);

impl WatchRoot {
    /// Create a new WatchRoot from any path-like value
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Get the inner path reference
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Short name used in user-facing text
    ///
    /// Yields the final path component (`/home/user/Docs` becomes `Docs`);
    /// falls back to the full path when there is no final component (e.g. `/`).
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.to_string_lossy().into_owned())
    }
}

impl Display for WatchRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for WatchRoot {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

// ============================================================================
// SyncStatus / Watch
// ============================================================================

/// Whether a watched folder currently has an in-progress sync operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// An operation (index, upload, or download) is running for this folder
    Syncing,
    /// The folder is fully synchronized
    Idle,
}

impl SyncStatus {
    /// Returns `true` for [`SyncStatus::Syncing`]
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncStatus::Syncing)
    }
}

impl Display for SyncStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncStatus::Syncing => "syncing",
            SyncStatus::Idle => "idle",
        };
        write!(f, "{}", s)
    }
}

/// One entry of a watch-list snapshot: a folder and its reported status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watch {
    /// The watched folder
    pub root: WatchRoot,
    /// Status at the time the snapshot was taken
    pub status: SyncStatus,
}

impl Watch {
    /// Create a new watch entry
    #[must_use]
    pub fn new(root: WatchRoot, status: SyncStatus) -> Self {
        Self { root, status }
    }
}

// ============================================================================
// Tests
// ============================================================================
