// src/monitor/mod.rs
//! Flatline detection and device supervision
//!
//! - `detector`: the stagnation rule
//! - `device`: one device's poll/restart state
//! - `runner`: the shared polling loop and cooldown policy

/// Share-count stagnation check
pub mod detector;

/// Per-device monitor
pub mod device;

/// Polling loop over all monitors
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main components for cleaner imports
pub use self::detector::is_flatlined;
pub use self::device::DeviceMonitor;
pub use self::runner::{MonitorLoop, RESTART_COOLDOWN};
