// src/stats/report.rs
//! Report record and its two renderings
//!
//! A [`Report`] is built once per device cycle and rendered twice: with ANSI
//! styling for the console and as plain text for the log files. Both
//! renderings share the same line layout; only the painting differs.

use crate::stats::snapshot::{StatusSnapshot, UNKNOWN, ceil_tenth, format_uptime, round_tenth};
use colored::Colorize;

const TIMESTAMP_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// Something that happened during a cycle besides the status read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// Status read failed with the given detail
    FetchFailed(String),
    /// Shares did not advance since the previous successful poll
    Flatlined,
    /// Restart command accepted
    RestartSent,
    /// Restart command answered with a non-200 status
    RestartRejected(u16),
    /// Restart command could not be delivered
    RestartFailed(String),
}

/// How a report is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// No markup, for log files
    Plain,
    /// ANSI colors, for the console
    Styled,
}

/// Which part of the line is being painted
#[derive(Debug, Clone, Copy)]
enum Field {
    Timestamp,
    Hostname,
    Uptime,
    Hashrate,
    AsicTemp,
    VrTemp,
    Shares,
    Restarts,
}

impl Style {
    fn paint(self, field: Field, text: &str) -> String {
        if self == Style::Plain {
            return text.to_string();
        }
        let painted = match field {
            Field::Timestamp => text.bright_green(),
            Field::Hostname | Field::Restarts => text.bright_cyan(),
            Field::Uptime => text.truecolor(0, 175, 135),
            Field::Hashrate => text.bright_blue(),
            Field::AsicTemp => text.bright_red(),
            Field::VrTemp => text.bright_magenta(),
            Field::Shares => text.bright_yellow(),
        };
        painted.to_string()
    }
}

/// Structured outcome of one device cycle
#[derive(Debug, Clone)]
pub struct Report {
    /// Device address, used when the hostname is unknown
    pub ip: String,
    /// Status read during the cycle (all unknown if the read failed)
    pub snapshot: StatusSnapshot,
    /// Restart count after the cycle
    pub restart_count: u64,
    /// Events in the order they happened
    pub events: Vec<ReportEvent>,
}

impl Report {
    /// Name shown in the hostname column
    pub fn label(&self) -> &str {
        self.snapshot.hostname.as_deref().unwrap_or(&self.ip)
    }

    /// Whether the status read failed
    pub fn fetch_failed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, ReportEvent::FetchFailed(_)))
    }

    /// Renders the report as output lines
    ///
    /// `width` is the hostname column width shared by every device in the batch.
    pub fn render(&self, style: Style, width: usize) -> Vec<String> {
        let timestamp = format!("[{}]", self.snapshot.fetched_at.format(TIMESTAMP_FORMAT));
        let label = format!("{:<width$}", self.label(), width = width);
        let prefix = format!(
            "{} {}:",
            style.paint(Field::Timestamp, &timestamp),
            style.paint(Field::Hostname, &label)
        );

        let mut lines = Vec::with_capacity(self.events.len() + 1);
        if !self.fetch_failed() {
            lines.push(format!("{} {}", prefix, self.status_line(style)));
        }
        for event in &self.events {
            lines.push(format!("{} {}", prefix, self.event_line(event)));
        }
        lines
    }

    fn status_line(&self, style: Style) -> String {
        let snap = &self.snapshot;
        let hashrate = snap
            .hashrate_ghs
            .map(|h| format!("{:.1}", ceil_tenth(h)))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let asic = snap
            .asic_temp_c
            .map(|t| format!("{:.1}", round_tenth(t)))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let vr = snap
            .vr_temp_c
            .map(|t| t.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        format!(
            "⏱  Uptime: {} | 💪 Hash: {} | 🔥 ASIC: {} / VR: {} | ✅ Shares: {} | Restarts: {}",
            style.paint(Field::Uptime, &format_uptime(snap.uptime)),
            style.paint(Field::Hashrate, &format!("{} GH/s", hashrate)),
            style.paint(Field::AsicTemp, &format!("{}°C", asic)),
            style.paint(Field::VrTemp, &format!("{}°C", vr)),
            style.paint(Field::Shares, &snap.shares_accepted.to_string()),
            style.paint(Field::Restarts, &self.restart_count.to_string()),
        )
    }

    fn event_line(&self, event: &ReportEvent) -> String {
        match event {
            ReportEvent::FetchFailed(detail) => {
                format!("🚫 Error communicating with Bitaxe at {}: {}", self.ip, detail)
            }
            ReportEvent::Flatlined => "⚠️ No new shares detected. Restarting Bitaxe...".to_string(),
            ReportEvent::RestartSent => "✅ Restart command sent successfully.".to_string(),
            ReportEvent::RestartRejected(code) => {
                format!("⚠️ Failed to restart Bitaxe: {}", code)
            }
            ReportEvent::RestartFailed(detail) => {
                format!("🚫 Error sending restart command: {}", detail)
            }
        }
    }
}
