// src/config/config.rs
use crate::{cli::Commands, network::device::device_url, utils::error::MonitorError};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Log retention used when no device list file is involved
pub const DEFAULT_RETAIN_LOG_DAYS: usize = 7;

/// Largest accepted `retain-log-days` value (ten years)
pub const MAX_RETAIN_LOG_DAYS: usize = 3650;

/// Resolved settings for a monitoring run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Device addresses in reporting order
    pub devices: Vec<String>,

    /// Wait between polls when nothing was restarted
    pub interval: Duration,

    /// Rotated log files kept per device
    pub retain_log_days: usize,

    /// Directory holding the per-device log files
    pub log_dir: PathBuf,
}

/// Contents of a device list file
///
/// ```text
/// # office rack
/// 192.168.2.88
/// 192.168.2.89
/// retain-log-days=14
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceList {
    /// Device addresses in file order, duplicates removed
    pub devices: Vec<String>,

    /// `retain-log-days` setting (default 7)
    pub retain_log_days: usize,
}

impl DeviceList {
    /// Loads a device list file
    ///
    /// # Returns
    /// * `Ok(DeviceList)` - Successfully loaded list
    /// * `Err(MonitorError)` - If the file is missing, malformed or empty
    pub fn load(path: &Path) -> Result<Self, MonitorError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::ConfigError(format!(
                "Failed to read device list at {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&contents)
    }

    /// Parses device list text
    pub fn parse(contents: &str) -> Result<Self, MonitorError> {
        let mut list = DeviceList {
            devices: Vec::new(),
            retain_log_days: DEFAULT_RETAIN_LOG_DAYS,
        };

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                list.apply_setting(key.trim(), value.trim(), index + 1)?;
                continue;
            }

            device_url(line).map_err(|e| {
                MonitorError::ConfigError(format!(
                    "Line {}: invalid device address '{}': {}",
                    index + 1,
                    line,
                    e
                ))
            })?;

            if list.devices.iter().any(|d| d == line) {
                log::warn!("Line {}: device {} listed twice, ignoring", index + 1, line);
                continue;
            }
            list.devices.push(line.to_string());
        }

        if list.devices.is_empty() {
            return Err(MonitorError::ConfigError(
                "Device list contains no device addresses".to_string(),
            ));
        }

        Ok(list)
    }

    fn apply_setting(&mut self, key: &str, value: &str, line: usize) -> Result<(), MonitorError> {
        match key {
            "retain-log-days" => {
                self.retain_log_days = value
                    .parse::<usize>()
                    .ok()
                    .filter(|days| *days <= MAX_RETAIN_LOG_DAYS)
                    .ok_or_else(|| {
                        MonitorError::ConfigError(format!(
                            "Line {}: retain-log-days must be a whole number of days \
                             between 0 and {}, got '{}'",
                            line, MAX_RETAIN_LOG_DAYS, value
                        ))
                    })?;
            }
            _ => log::warn!("Line {}: unknown setting '{}', ignoring", line, key),
        }
        Ok(())
    }
}

impl Config {
    /// Resolves the run configuration from command line options
    ///
    /// An explicit address monitors that device alone with the default
    /// retention; otherwise devices and retention come from the list file.
    pub fn from_cli(cli: &Commands) -> Result<Self, MonitorError> {
        let (devices, retain_log_days) = match &cli.ip {
            Some(ip) => {
                device_url(ip)?;
                (vec![ip.clone()], DEFAULT_RETAIN_LOG_DAYS)
            }
            None => {
                let list = DeviceList::load(&cli.config)?;
                (list.devices, list.retain_log_days)
            }
        };

        Ok(Config {
            devices,
            interval: Duration::from_secs(cli.interval),
            retain_log_days,
            log_dir: cli.log_dir.clone(),
        })
    }
}
