// src/cli/mod.rs
//! Command-line interface definitions

/// Argument parser for the monitor binary
pub mod commands;

pub use commands::Commands;
