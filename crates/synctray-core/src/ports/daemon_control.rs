//! Daemon control port (driven/secondary port)
//!
//! The status engine is almost entirely a consumer of daemon events, but it
//! does issue one request in the opposite direction: after the daemon reports
//! a reload, the engine must ask for a fresh watch-list snapshot. This port
//! carries that request over whatever transport the application wires up.

/// Port trait for requests sent back to the synchronization daemon
///
/// ## Design Notes
///
/// - The reply arrives asynchronously as a regular
///   [`DaemonEvent::WatchListResponse`](crate::domain::DaemonEvent) on the
///   inbound event stream, not as a return value here.
/// - Uses `anyhow::Result` because transport failures are adapter-specific.
#[async_trait::async_trait]
pub trait IDaemonControl: Send + Sync {
    /// Asks the daemon to publish its current watch list
    async fn request_watch_list(&self) -> anyhow::Result<()>;
}
