// src/utils/mod.rs
//! Utilities module for common functionality
//!
//! Error handling and diagnostic logging shared by the whole monitor.

/// Error types and handling utilities
///
/// Contains the [`MonitorError`] enum which defines all error conditions
/// for the monitor, along with conversion implementations.
pub mod error;

/// Logging configuration and utilities
pub mod logging;

// Re-export for easier access
pub use error::MonitorError;
pub use logging::init_logging;
