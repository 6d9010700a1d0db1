// src/config/mod.rs
//! Configuration management for the monitor
//!
//! Settings come from two places:
//! - The command line (single device address, interval, paths)
//! - A plain-text device list file when no address is given
//!
//! The device list holds one address per line plus `key=value` settings;
//! `#` lines and blank lines are ignored.

/// Core configuration implementation
///
/// Contains the [`Config`] struct and the [`DeviceList`] file parser.
pub mod config;

// Re-export key items for easy access
pub use config::{Config, DEFAULT_RETAIN_LOG_DAYS, DeviceList, MAX_RETAIN_LOG_DAYS};

use crate::cli::Commands;
use crate::utils::error::MonitorError;

/// Resolves the run configuration from parsed command line options
///
/// # Returns
/// * `Ok(Config)` - Devices, interval and log settings for the run
/// * `Err(MonitorError)` - If the device list is missing or malformed
pub fn load(cli: &Commands) -> Result<Config, MonitorError> {
    Config::from_cli(cli)
}
