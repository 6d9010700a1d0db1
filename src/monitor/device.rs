// src/monitor/device.rs
use crate::monitor::detector::is_flatlined;
use crate::network::{DeviceApi, DeviceClient};
use crate::stats::{Report, ReportEvent, ReportSink, StatusSnapshot};
use crate::types::{CycleResult, RestartOutcome};
use chrono::Local;

/// Per-device poll/evaluate/restart state
///
/// Runs exactly one cycle per [`run_cycle`](Self::run_cycle) call and knows
/// nothing about timing; [`MonitorLoop`](crate::monitor::MonitorLoop) decides
/// when to call it.
pub struct DeviceMonitor<C: DeviceApi = DeviceClient> {
    /// Connection to the device
    client: C,
    /// Share count from the last successful poll
    previous_shares: Option<u64>,
    /// Restart commands the device accepted, never decremented
    restart_count: u64,
    /// Plain-text log for this device
    log: Box<dyn ReportSink>,
}

impl<C: DeviceApi> DeviceMonitor<C> {
    /// Creates a monitor for `client`, writing its reports to `log`
    pub fn new(client: C, log: Box<dyn ReportSink>) -> Self {
        DeviceMonitor {
            client,
            previous_shares: None,
            restart_count: 0,
            log,
        }
    }

    /// Device address
    pub fn ip(&self) -> &str {
        self.client.ip()
    }

    /// Share count of the last successful poll, if any
    pub fn previous_shares(&self) -> Option<u64> {
        self.previous_shares
    }

    /// Number of restarts the device has accepted
    pub fn restart_count(&self) -> u64 {
        self.restart_count
    }

    /// Runs one poll-evaluate-restart cycle
    ///
    /// # Flow
    /// 1. Reads the status; on failure reports it and leaves the share
    ///    baseline untouched
    /// 2. Compares shares with the previous successful poll
    /// 3. Sends a restart if the count has not moved
    /// 4. Stores the new baseline
    pub async fn run_cycle(&mut self) -> CycleResult {
        let snapshot = match self.client.fetch_status().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::debug!("{}: status fetch failed: {}", self.ip(), e);
                let report = self.report(
                    StatusSnapshot::unavailable(Local::now()),
                    vec![ReportEvent::FetchFailed(e.to_string())],
                );
                return CycleResult {
                    restarted: false,
                    fetch_failed: true,
                    report,
                };
            }
        };

        let mut events = Vec::new();
        let mut restarted = false;
        let shares = snapshot.shares_accepted;

        if is_flatlined(self.previous_shares, shares) {
            events.push(ReportEvent::Flatlined);
            match self.client.send_restart().await {
                RestartOutcome::Succeeded => {
                    self.restart_count += 1;
                    restarted = true;
                    events.push(ReportEvent::RestartSent);
                }
                RestartOutcome::RejectedByDevice(code) => {
                    events.push(ReportEvent::RestartRejected(code.as_u16()));
                }
                RestartOutcome::TransportFailed(detail) => {
                    events.push(ReportEvent::RestartFailed(detail));
                }
            }
        }

        self.previous_shares = Some(shares);

        CycleResult {
            restarted,
            fetch_failed: false,
            report: self.report(snapshot, events),
        }
    }

    /// Appends a report to this device's log file
    ///
    /// Write failures are logged and swallowed so one device's disk trouble
    /// never stops the loop.
    pub fn record(&mut self, report: &Report, width: usize) {
        if let Err(e) = self.log.emit(report, width) {
            log::warn!("{}: failed to write log file: {}", report.ip, e);
        }
    }

    fn report(&self, snapshot: StatusSnapshot, events: Vec<ReportEvent>) -> Report {
        Report {
            ip: self.ip().to_string(),
            snapshot,
            restart_count: self.restart_count,
            events,
        }
    }
}
