//! Bitaxe Monitor - flatline detection and automatic restarts for Bitaxe miners
//!
//! This crate polls one or more network-attached miners over HTTP and:
//! - Reports hashrate, temperatures, shares and uptime at a fixed cadence
//! - Restarts any device whose accepted-share counter stops advancing
//! - Keeps a daily rotating plain-text log per device

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Flatline detection, per-device monitors and the polling loop
pub mod monitor;

/// Device HTTP API client
pub mod network;

/// Status snapshots, report rendering and report sinks
pub mod stats;

/// Utility functions and error handling
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::Config;
pub use monitor::{DeviceMonitor, MonitorLoop, is_flatlined};
pub use network::{DeviceApi, DeviceClient};
pub use stats::{Report, ReportSink, StatusSnapshot};
pub use types::{CycleResult, RestartOutcome};
pub use utils::{MonitorError, init_logging};
