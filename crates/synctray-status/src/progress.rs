//! Upload progress bookkeeping for the tray status line
//!
//! Tracks the running byte total across one multi-file upload transaction.
//! The daemon reports per-file progress events; the status line shows how
//! many bytes the batch has uploaded so far and what fraction of the whole
//! transaction that is. The counter is ephemeral: it resets whenever a new
//! batch begins and is never persisted.

// ============================================================================
// UploadProgress
// ============================================================================

/// Running byte total for the current upload transaction
///
/// Only the upload-progress event sequence for a single transaction touches
/// this; the dispatcher owns it and serializes access.
#[derive(Debug, Default)]
pub struct UploadProgress {
    /// Bytes uploaded by files completed so far in this batch
    uploaded: u64,
}

impl UploadProgress {
    /// Creates a counter at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the running total (a new batch began)
    pub fn reset(&mut self) {
        self.uploaded = 0;
    }

    /// Adds one completed file's size to the running total
    pub fn add(&mut self, bytes: u64) {
        self.uploaded += bytes;
    }

    /// Bytes uploaded so far in this batch
    #[must_use]
    pub fn uploaded_bytes(&self) -> u64 {
        self.uploaded
    }

    /// Percentage of `total_bytes` uploaded so far, rounded to the nearest
    /// whole number
    ///
    /// A zero total yields 0 rather than a division fault.
    #[must_use]
    pub fn percent_of(&self, total_bytes: u64) -> u64 {
        if total_bytes == 0 {
            return 0;
        }
        (self.uploaded as f64 / total_bytes as f64 * 100.0).round() as u64
    }
}

/// Formats a byte count for the status line
pub(crate) fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

// ============================================================================
// Unit tests
// ============================================================================
