// src/stats/snapshot.rs
use chrono::{DateTime, Local};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Marker rendered for any value the device did not report
pub const UNKNOWN: &str = "N/A";

/// Body of `GET /api/system/info`
///
/// Every field is optional and kept as a raw JSON value; firmware versions
/// disagree on types, so normalisation happens in [`StatusSnapshot::from_info`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    /// Device hostname
    pub hostname: Option<Value>,
    /// Hashrate in GH/s
    pub hash_rate: Option<Value>,
    /// ASIC temperature in °C
    pub temp: Option<Value>,
    /// Voltage regulator temperature in °C
    pub vr_temp: Option<Value>,
    /// Shares accepted since boot
    pub shares_accepted: Option<Value>,
    /// Seconds since boot
    pub uptime_seconds: Option<Value>,
}

/// Normalized result of one status poll
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    /// Device hostname
    pub hostname: Option<String>,
    /// Hashrate in GH/s
    pub hashrate_ghs: Option<f64>,
    /// ASIC temperature in °C
    pub asic_temp_c: Option<f64>,
    /// Voltage regulator temperature in °C
    pub vr_temp_c: Option<f64>,
    /// Shares accepted since boot (0 when not reported)
    pub shares_accepted: u64,
    /// Time since boot
    pub uptime: Option<Duration>,
    /// When the poll completed
    pub fetched_at: DateTime<Local>,
}

impl StatusSnapshot {
    /// Snapshot used when the poll failed: everything unknown except the time
    pub fn unavailable(fetched_at: DateTime<Local>) -> Self {
        StatusSnapshot {
            hostname: None,
            hashrate_ghs: None,
            asic_temp_c: None,
            vr_temp_c: None,
            shares_accepted: 0,
            uptime: None,
            fetched_at,
        }
    }

    /// Builds a snapshot from a decoded status body
    pub fn from_info(info: SystemInfo, fetched_at: DateTime<Local>) -> Self {
        StatusSnapshot {
            hostname: info.hostname.and_then(|v| v.as_str().map(str::to_owned)),
            hashrate_ghs: info.hash_rate.as_ref().and_then(Value::as_f64),
            asic_temp_c: info.temp.as_ref().and_then(Value::as_f64),
            vr_temp_c: info.vr_temp.as_ref().and_then(Value::as_f64),
            shares_accepted: info
                .shares_accepted
                .as_ref()
                .and_then(Value::as_u64)
                .unwrap_or(0),
            uptime: info.uptime_seconds.as_ref().and_then(parse_uptime),
            fetched_at,
        }
    }
}

/// Accepts integer seconds, non-negative fractional seconds and numeric strings
fn parse_uptime(value: &Value) -> Option<Duration> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .map(Duration::from_secs),
        Value::String(s) => s.trim().parse::<u64>().ok().map(Duration::from_secs),
        _ => None,
    }
}

/// Rounds a hashrate up to the next tenth; exact tenths are kept as-is
pub fn ceil_tenth(value: f64) -> f64 {
    (value * 10.0).ceil() / 10.0
}

/// Rounds to the nearest tenth
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Formats an uptime as `<days>d HH:MM:SS`, or the unknown marker
pub fn format_uptime(uptime: Option<Duration>) -> String {
    let Some(uptime) = uptime else {
        return UNKNOWN.to_string();
    };
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}
