//! SyncTray Core - Domain logic and port definitions
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Watch`, `WatchRoot`, `ChangeSet`, `DaemonEvent`, `IconFrame`
//! - **Port definitions** - Traits for adapters: `IPresentationSink`, `IDaemonControl`
//! - **Configuration** - Typed YAML configuration with defaults and validation
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure data types with no external dependencies.
//! Ports define trait interfaces that adapter crates implement; the status
//! engine in `synctray-status` drives those ports.

pub mod config;
pub mod domain;
pub mod ports;
