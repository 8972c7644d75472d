//! Stdout-backed daemon control
//!
//! The headless front-end talks back to the daemon over the same pipe pair
//! it is fed from: requests are written as JSON lines to standard output,
//! and the daemon's replies come back as events on standard input.

use anyhow::Context;
use async_trait::async_trait;
use synctray_core::ports::IDaemonControl;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Daemon control port that emits request lines on stdout
///
/// Stdout is wrapped in a mutex so concurrent requests cannot interleave
/// line fragments.
pub struct StdoutDaemonControl {
    stdout: Mutex<tokio::io::Stdout>,
}

impl StdoutDaemonControl {
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutDaemonControl {
    fn default() -> Self {
        Self::new()
    }
}

fn watch_list_request_line() -> String {
    let mut line = serde_json::json!({ "request": "list_watches" }).to_string();
    line.push('\n');
    line
}

#[async_trait]
impl IDaemonControl for StdoutDaemonControl {
    async fn request_watch_list(&self) -> anyhow::Result<()> {
        let line = watch_list_request_line();
        let mut stdout = self.stdout.lock().await;
        stdout
            .write_all(line.as_bytes())
            .await
            .context("Failed to write watch-list request to stdout")?;
        stdout
            .flush()
            .await
            .context("Failed to flush watch-list request")?;
        debug!("Requested watch list from daemon");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_is_one_json_object_per_line() {
        let line = watch_list_request_line();
        assert_eq!(line, "{\"request\":\"list_watches\"}\n");
    }

    #[tokio::test]
    async fn test_request_watch_list_succeeds() {
        let control = StdoutDaemonControl::new();
        assert!(control.request_watch_list().await.is_ok());
    }
}
