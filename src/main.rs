// src/main.rs
use bitaxe_monitor_rs::*;
use clap::Parser;
use tokio::runtime::Runtime;

/// Main entry point for the monitor
///
/// # Flow
/// 1. Parses command line arguments
/// 2. Resolves devices and settings (fatal on configuration errors)
/// 3. Opens per-device log files and starts the polling loop
fn main() -> Result<(), MonitorError> {
    let cli = Commands::parse();
    init_logging();

    let config = config::load(&cli)?;
    let mut runner = MonitorLoop::from_config(&config)?;

    let rt = Runtime::new()?;
    rt.block_on(runner.run());

    Ok(())
}
