// src/network/mod.rs
//! Network communication with monitored devices
//!
//! Each device exposes a small HTTP API: a status document and a restart
//! endpoint. [`DeviceClient`] speaks it; [`DeviceApi`] is the seam the
//! monitor depends on.

/// Device HTTP client implementation
///
/// Issues bounded-timeout status reads and restart commands. Never retries;
/// retry policy belongs to the monitor's next cycle.
pub mod device;

// Re-export main components for cleaner imports
pub use device::{DeviceApi, DeviceClient};
