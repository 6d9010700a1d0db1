// src/cli/commands.rs
use clap::Parser;
use std::path::PathBuf;

/// Bitaxe flatline monitor - polls devices and restarts those whose shares stop moving
#[derive(Parser, Debug)]
#[command(name = "bitaxe-monitor")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// Device address (e.g. 192.168.2.88); read devices from the list file if omitted
    pub ip: Option<String>,

    /// Seconds between checks
    #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Device list file used when no address is given
    #[arg(short, long, default_value = "bitaxe_ips.txt")]
    pub config: PathBuf,

    /// Directory for per-device log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Commands::parse_from(["bitaxe-monitor"]);
        assert_eq!(cli.ip, None);
        assert_eq!(cli.interval, 60);
        assert_eq!(cli.config, PathBuf::from("bitaxe_ips.txt"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Commands::try_parse_from(["bitaxe-monitor", "-i", "0"]).is_err());
        assert!(Commands::try_parse_from(["bitaxe-monitor", "--interval", "ten"]).is_err());
    }
}
