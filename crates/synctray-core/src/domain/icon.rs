//! Tray icon frame catalogue
//!
//! The engine selects *which* frame to show; rendering is the presentation
//! sink's concern. Frames map onto a fixed asset set: one neutral image for
//! startup, one static "up to date" image, and a short rotating animation
//! shown while any folder is syncing.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A single tray icon state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconFrame {
    /// Neutral icon shown at startup, before the first watch list arrives
    NoOverlay,
    /// Static icon shown when every watched folder is in sync
    InSync,
    /// One frame of the rotating sync animation (0-based index)
    Syncing(usize),
}

impl IconFrame {
    /// Number of frames in the sync animation
    pub const SYNC_FRAME_COUNT: usize = 6;

    /// Build a sync animation frame, wrapping the index into range
    #[must_use]
    pub fn sync_frame(index: usize) -> Self {
        IconFrame::Syncing(index % Self::SYNC_FRAME_COUNT)
    }

    /// Base name of the image asset for this frame
    ///
    /// Asset files are numbered from 1, so `Syncing(0)` maps to
    /// `tray-syncing1`.
    #[must_use]
    pub fn asset_name(&self) -> String {
        match self {
            IconFrame::NoOverlay => "tray".to_string(),
            IconFrame::InSync => "tray-uptodate".to_string(),
            IconFrame::Syncing(index) => format!("tray-syncing{}", index + 1),
        }
    }
}

impl Display for IconFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.asset_name())
    }
}

/// Rendering hint for the presentation layer
///
/// Selects between the colored and the monochrome asset set. The engine
/// carries the hint from configuration to the sink and never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconTheme {
    /// Full-color icons
    Default,
    /// Monochrome icons for dark or minimal panels
    Monochrome,
}

impl Default for IconTheme {
    fn default() -> Self {
        IconTheme::Default
    }
}

impl Display for IconTheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            IconTheme::Default => "default",
            IconTheme::Monochrome => "monochrome",
        };
        write!(f, "{}", s)
    }
}
