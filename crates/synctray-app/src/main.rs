//! SyncTray - Headless tray status engine
//!
//! This binary wires the status engine to a line-based daemon feed and
//! handles:
//! - Tray state rendering as structured log events
//! - Watch-list requests written as JSON lines to stdout
//! - Graceful shutdown on SIGTERM/SIGINT or end of input
//!
//! # Architecture
//!
//! Daemon events arrive as JSON lines on standard input and are pumped into
//! a `TrayController`, which owns the status aggregation table, the event
//! dispatcher, and the icon animation task. The whole pipeline is controlled
//! by a `CancellationToken` that is triggered on receipt of SIGTERM or
//! SIGINT. A graphical shell would replace the log sink with a real tray
//! widget; everything else stays the same.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use synctray_core::config::Config;
use synctray_core::domain::DaemonEvent;
use synctray_core::ports::{IDaemonControl, IPresentationSink};
use synctray_status::controller::TrayController;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod control;
mod sink;

use control::StdoutDaemonControl;
use sink::LogPresentationSink;

// ============================================================================
// CLI
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "synctray", version, about = "Tray status engine for folder synchronization")]
pub struct Cli {
    /// Use alternate config file
    #[arg(long)]
    config: Option<String>,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Maps CLI verbosity flags onto a tracing filter directive
///
/// `--quiet` wins over `-v`; with neither flag the configured level applies.
fn log_filter(quiet: bool, verbose: u8, config_level: &str) -> String {
    if quiet {
        return "warn".to_string();
    }
    match verbose {
        0 => config_level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

// ============================================================================
// Event feed
// ============================================================================

/// Pumps JSON-line daemon events from standard input into the controller
///
/// Lines that fail to parse are logged and skipped so one malformed entry
/// in a hand-fed debugging session does not kill the engine. The loop ends
/// on end of input, on shutdown, or when the receiving side is dropped.
async fn event_feed_loop(tx: mpsc::Sender<DaemonEvent>, shutdown: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = shutdown.cancelled() => {
                debug!("Event feed stopping on shutdown signal");
                break;
            }
        };

        match line {
            Ok(Some(raw)) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    continue;
                }
                match serde_json::from_str::<DaemonEvent>(raw) {
                    Ok(event) => {
                        if tx.send(event).await.is_err() {
                            // Controller stopped listening
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, line = %raw, "Skipping malformed event line");
                    }
                }
            }
            Ok(None) => {
                info!("Event feed reached end of input");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read from standard input");
                break;
            }
        }
    }
}

// ============================================================================
// Graceful shutdown signal handler
// ============================================================================

/// Waits for SIGTERM or SIGINT and triggers the cancellation token
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}

// ============================================================================
// Main entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The config is loaded before tracing init because the filter falls
    // back to the configured logging.level when no -v/--quiet flag is given.
    // An explicitly named config file must load; the default path may be
    // absent.
    let (config_path, config) = match cli.config {
        Some(path) => {
            let path = PathBuf::from(path);
            let config = Config::load(&path).with_context(|| {
                format!("Failed to load configuration file {}", path.display())
            })?;
            (path, config)
        }
        None => {
            let path = Config::default_path();
            let config = Config::load_or_default(&path);
            (path, config)
        }
    };

    let filter = log_filter(cli.quiet, cli.verbose, &config.logging.level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    info!("SyncTray engine starting (synctray)");
    info!(config_path = %config_path.display(), "Loaded configuration");

    let validation_errors = config.validate();
    if !validation_errors.is_empty() {
        for error in &validation_errors {
            warn!(field = %error.field, message = %error.message, "Invalid configuration value");
        }
        anyhow::bail!(
            "Configuration file {} has {} invalid value(s)",
            config_path.display(),
            validation_errors.len()
        );
    }

    let shutdown_token = CancellationToken::new();

    // Spawn signal handler task
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal(signal_token).await;
    });

    let sink: Arc<dyn IPresentationSink> = Arc::new(LogPresentationSink::new(config.tray.theme));
    let daemon: Arc<dyn IDaemonControl> = Arc::new(StdoutDaemonControl::new());

    let mut controller = TrayController::new(sink, daemon, &config.tray, shutdown_token.clone());

    let (tx, rx) = mpsc::channel(64);
    let feed = tokio::spawn(event_feed_loop(tx, shutdown_token.clone()));

    controller.run(rx).await;
    controller.shutdown().await;

    if let Err(e) = feed.await {
        warn!(error = %e, "Event feed task panicked");
    }

    info!("SyncTray engine shut down gracefully");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_quiet_wins_over_verbose() {
        assert_eq!(log_filter(true, 3, "info"), "warn");
    }

    #[test]
    fn test_log_filter_uses_config_level_without_flags() {
        assert_eq!(log_filter(false, 0, "error"), "error");
    }

    #[test]
    fn test_log_filter_verbosity_mapping() {
        assert_eq!(log_filter(false, 1, "info"), "debug");
        assert_eq!(log_filter(false, 2, "info"), "trace");
        assert_eq!(log_filter(false, 9, "info"), "trace");
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli =
            Cli::try_parse_from(["synctray", "-vv", "--config", "/tmp/synctray.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some("/tmp/synctray.yaml"));
        assert!(!cli.quiet);
    }
}
