//! Configuration module for SyncTray.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, and defaults. Every field has a default, so a
//! partial file (or no file at all) yields a working configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::icon::IconTheme;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for SyncTray.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tray: TrayConfig,
    pub logging: LoggingConfig,
}

/// Tray animation and rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayConfig {
    /// Milliseconds between animation frames while any folder is syncing.
    pub frame_interval_ms: u64,
    /// Milliseconds between syncing-flag polls while everything is idle.
    pub idle_poll_interval_ms: u64,
    /// Icon theme hint passed through to the presentation layer.
    pub theme: IconTheme,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// ConfigError and Config::load()
// ---------------------------------------------------------------------------

/// Errors that can occur while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The file was read but is not valid YAML for [`Config`]
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/synctray/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("synctray")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

// Config derives Default because all its fields implement Default.
// (clippy::derivable_impls)

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 500,
            idle_poll_interval_ms: 200,
            theme: IconTheme::Default,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"tray.frame_interval_ms"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- tray ---
        if self.tray.frame_interval_ms == 0 {
            errors.push(ValidationError {
                field: "tray.frame_interval_ms".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.tray.idle_poll_interval_ms == 0 {
            errors.push(ValidationError {
                field: "tray.idle_poll_interval_ms".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // -- Defaults --

    #[test]
    fn default_config_has_sensible_values() {
        let cfg = Config::default();
        assert_eq!(cfg.tray.frame_interval_ms, 500);
        assert_eq!(cfg.tray.idle_poll_interval_ms, 200);
        assert_eq!(cfg.tray.theme, IconTheme::Default);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn default_config_passes_validation() {
        let cfg = Config::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "unexpected validation errors: {errors:?}");
    }

    // -- Loading --

    #[test]
    fn load_from_yaml_file() {
        let yaml = r#"
tray:
  frame_interval_ms: 250
  idle_poll_interval_ms: 100
  theme: monochrome
logging:
  level: debug
"#;
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(yaml.as_bytes()).unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load config");
        assert_eq!(cfg.tray.frame_interval_ms, 250);
        assert_eq!(cfg.tray.idle_poll_interval_ms, 100);
        assert_eq!(cfg.tray.theme, IconTheme::Monochrome);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn load_fills_defaults_for_missing_sections() {
        let yaml = "tray:\n  frame_interval_ms: 1000\n";
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(yaml.as_bytes()).unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load partial config");
        assert_eq!(cfg.tray.frame_interval_ms, 1000);
        assert_eq!(cfg.tray.idle_poll_interval_ms, 200);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn load_or_default_returns_default_on_missing_file() {
        let cfg = Config::load_or_default(Path::new("/nonexistent/config.yaml"));
        assert_eq!(cfg.tray.frame_interval_ms, 500);
    }

    #[test]
    fn load_returns_read_error_on_missing_file() {
        let result = Config::load(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_returns_parse_error_on_invalid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(b"not: [valid: yaml: {{{").unwrap();
        tmp.flush().unwrap();

        let result = Config::load(tmp.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    // -- Validation --

    #[test]
    fn validate_catches_zero_frame_interval() {
        let mut cfg = Config::default();
        cfg.tray.frame_interval_ms = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "tray.frame_interval_ms"));
    }

    #[test]
    fn validate_catches_zero_idle_poll_interval() {
        let mut cfg = Config::default();
        cfg.tray.idle_poll_interval_ms = 0;
        let errors = cfg.validate();
        assert!(errors
            .iter()
            .any(|e| e.field == "tray.idle_poll_interval_ms"));
    }

    #[test]
    fn validate_catches_invalid_log_level() {
        let mut cfg = Config::default();
        cfg.logging.level = "verbose".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "logging.level"));
    }

    #[test]
    fn validate_accepts_all_valid_log_levels() {
        for level in VALID_LOG_LEVELS {
            let mut cfg = Config::default();
            cfg.logging.level = level.to_string();
            let errors = cfg.validate();
            assert!(
                !errors.iter().any(|e| e.field == "logging.level"),
                "level '{level}' should be valid"
            );
        }
    }

    // -- default_path --

    #[test]
    fn default_path_ends_with_config_yaml() {
        let p = Config::default_path();
        assert!(p.ends_with("synctray/config.yaml"));
    }

    // -- ValidationError Display --

    #[test]
    fn validation_error_display() {
        let err = ValidationError {
            field: "tray.frame_interval_ms".into(),
            message: "must be greater than 0".into(),
        };
        assert_eq!(
            err.to_string(),
            "tray.frame_interval_ms: must be greater than 0"
        );
    }
}
