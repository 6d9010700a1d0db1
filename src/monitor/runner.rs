// src/monitor/runner.rs
//! Polling loop driving every configured device
//!
//! Each tick polls all devices concurrently, waits for every cycle to finish,
//! then reports them in configuration order so the console output of a tick
//! is never interleaved.

use crate::config::Config;
use crate::monitor::device::DeviceMonitor;
use crate::network::{DeviceApi, DeviceClient};
use crate::stats::{ReportSink, sink};
use crate::types::CycleResult;
use crate::utils::error::MonitorError;
use colored::Colorize;
use futures::future::join_all;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tokio::time::Instant;

/// Wait after any accepted restart, whatever the polling interval
pub const RESTART_COOLDOWN: Duration = Duration::from_secs(60);

const SEPARATOR_WIDTH: usize = 100;

/// Drives a fixed, ordered set of device monitors on a shared interval
pub struct MonitorLoop<C: DeviceApi = DeviceClient> {
    /// Monitors in configuration order
    monitors: Vec<DeviceMonitor<C>>,
    /// Wait between ticks when nothing was restarted
    interval: Duration,
    /// Styled console output
    console: Box<dyn ReportSink>,
}

impl MonitorLoop<DeviceClient> {
    /// Builds monitors, HTTP clients and log files for every configured device
    ///
    /// # Errors
    /// Returns `MonitorError` if an address is invalid, the HTTP client
    /// cannot be built or a log file cannot be opened
    pub fn from_config(config: &Config) -> Result<Self, MonitorError> {
        let http = DeviceClient::http_client()?;

        let monitors = config
            .devices
            .iter()
            .map(|ip| {
                let client = DeviceClient::new(ip, http.clone())?;
                let log = sink::device_log(&config.log_dir, ip, config.retain_log_days)?;
                Ok(DeviceMonitor::new(client, Box::new(log)))
            })
            .collect::<Result<Vec<_>, MonitorError>>()?;

        Ok(MonitorLoop::new(
            monitors,
            config.interval,
            Box::new(sink::console()),
        ))
    }
}

impl<C: DeviceApi> MonitorLoop<C> {
    /// Creates a loop over `monitors` reporting to `console`
    pub fn new(
        monitors: Vec<DeviceMonitor<C>>,
        interval: Duration,
        console: Box<dyn ReportSink>,
    ) -> Self {
        MonitorLoop {
            monitors,
            interval,
            console,
        }
    }

    /// Monitors in reporting order
    pub fn monitors(&self) -> &[DeviceMonitor<C>] {
        &self.monitors
    }

    /// Runs one tick and returns how long to wait before the next one
    pub async fn tick(&mut self) -> Duration {
        let results = join_all(self.monitors.iter_mut().map(|m| m.run_cycle())).await;

        let width = results
            .iter()
            .map(|r| r.report.label().chars().count())
            .max()
            .unwrap_or(0);

        for (monitor, result) in self.monitors.iter_mut().zip(&results) {
            if let Err(e) = self.console.emit(&result.report, width) {
                log::warn!("Failed to write console report: {}", e);
            }
            monitor.record(&result.report, width);
        }

        if self.monitors.len() > 1 {
            if let Err(e) = self.console.emit_line(&"-".repeat(SEPARATOR_WIDTH)) {
                log::warn!("Failed to write console separator: {}", e);
            }
        }

        next_wait(&results, self.interval)
    }

    /// Polls forever; the process is stopped from outside
    pub async fn run(&mut self) {
        log::info!(
            "Monitoring {} device(s) every {}s",
            self.monitors.len(),
            self.interval.as_secs()
        );

        loop {
            let wait = self.tick().await;
            countdown(wait).await;
        }
    }
}

/// Picks the wait before the next tick
///
/// One accepted restart anywhere in the batch holds back every device for
/// the cooldown.
pub fn next_wait(results: &[CycleResult], interval: Duration) -> Duration {
    if results.iter().any(|r| r.restarted) {
        RESTART_COOLDOWN
    } else {
        interval
    }
}

/// Sleeps for `wait`, redrawing a per-second countdown on a terminal
async fn countdown(wait: Duration) {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        tokio::time::sleep(wait).await;
        return;
    }

    countdown_on(&mut stdout, wait).await;
}

/// Draws the countdown into `out`
///
/// On the first failed write the rest of the wait is slept without redraws.
async fn countdown_on<W: Write>(out: &mut W, wait: Duration) {
    let started = Instant::now();

    for remaining in (1..=wait.as_secs()).rev() {
        let drawn = write!(
            out,
            "\rNext check in: {} ",
            format!("{:2} seconds", remaining).bright_cyan()
        )
        .and_then(|_| out.flush());

        if let Err(e) = drawn {
            log::warn!("Failed to draw countdown: {}", e);
            tokio::time::sleep(wait.saturating_sub(started.elapsed())).await;
            return;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    if let Err(e) = write!(out, "\r{}\r", " ".repeat(30)).and_then(|_| out.flush()) {
        log::warn!("Failed to clear countdown: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::testing::{MemorySink, ScriptedDevice, Step};

    const INTERVAL: Duration = Duration::from_secs(15);

    fn build(devices: Vec<ScriptedDevice>) -> (MonitorLoop<ScriptedDevice>, MemorySink) {
        let console = MemorySink::default();
        let monitors = devices
            .into_iter()
            .map(|d| DeviceMonitor::new(d, Box::new(MemorySink::default())))
            .collect();
        (
            MonitorLoop::new(monitors, INTERVAL, Box::new(console.clone())),
            console,
        )
    }

    #[tokio::test]
    async fn normal_tick_waits_interval() {
        let device = ScriptedDevice::new("10.0.0.1", vec![Step::Shares(1), Step::Shares(2)]);
        let (mut runner, _) = build(vec![device]);
        assert_eq!(runner.tick().await, INTERVAL);
        assert_eq!(runner.tick().await, INTERVAL);
    }

    #[tokio::test]
    async fn one_restart_delays_whole_batch() {
        let stuck = ScriptedDevice::new("10.0.0.1", vec![Step::Shares(5), Step::Shares(5)]);
        let healthy = ScriptedDevice::new("10.0.0.2", vec![Step::Shares(1), Step::Shares(2)]);
        let (mut runner, _) = build(vec![stuck.clone(), healthy.clone()]);

        assert_eq!(runner.tick().await, INTERVAL);
        assert_eq!(runner.tick().await, RESTART_COOLDOWN);
        assert_eq!(stuck.restart_calls(), 1);
        assert_eq!(healthy.restart_calls(), 0);
        assert_eq!(runner.monitors()[0].restart_count(), 1);
        assert_eq!(runner.monitors()[1].restart_count(), 0);
    }

    #[tokio::test]
    async fn failed_restart_does_not_trigger_cooldown() {
        let stuck = ScriptedDevice::new("10.0.0.1", vec![Step::Shares(5), Step::Shares(5)])
            .with_restart(crate::types::RestartOutcome::TransportFailed("timeout".into()));
        let (mut runner, _) = build(vec![stuck]);
        runner.tick().await;
        assert_eq!(runner.tick().await, INTERVAL);
    }

    #[tokio::test]
    async fn one_failing_device_does_not_affect_others() {
        let down = ScriptedDevice::new("10.0.0.1", vec![Step::Fail, Step::Fail]);
        let up = ScriptedDevice::new("10.0.0.2", vec![Step::Shares(8), Step::Shares(8)]);
        let (mut runner, console) = build(vec![down, up.clone()]);

        runner.tick().await;
        assert_eq!(runner.tick().await, RESTART_COOLDOWN);
        assert_eq!(up.restart_calls(), 1);
        assert_eq!(runner.monitors()[0].previous_shares(), None);

        let lines = console.lines();
        assert!(lines[0].contains("Error communicating with Bitaxe at 10.0.0.1"));
        assert!(lines[1].contains("Shares: 8"));
    }

    #[tokio::test]
    async fn reports_are_ordered_aligned_and_separated() {
        let short = ScriptedDevice::new("10.0.0.1", vec![Step::Shares(1)]).with_hostname("a");
        let long =
            ScriptedDevice::new("10.0.0.2", vec![Step::Shares(1)]).with_hostname("bitaxe-long");
        let (mut runner, console) = build(vec![short, long]);
        runner.tick().await;

        let lines = console.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(&format!("] {:<11}: ", "a")));
        assert!(lines[1].contains("] bitaxe-long: "));
        assert_eq!(lines[2], "-".repeat(SEPARATOR_WIDTH));
    }

    #[tokio::test]
    async fn single_device_has_no_separator() {
        let device = ScriptedDevice::new("10.0.0.1", vec![Step::Shares(1)]);
        let (mut runner, console) = build(vec![device]);
        runner.tick().await;
        assert_eq!(console.lines().len(), 1);
    }

    /// Writer whose every write fails
    struct BrokenPipe {
        attempts: usize,
    }

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn countdown_draws_and_clears() {
        let mut out = Vec::new();
        countdown_on(&mut out, Duration::from_secs(1)).await;

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Next check in: "));
        assert!(text.contains(" 1 seconds"));
        assert!(text.ends_with(&format!("\r{}\r", " ".repeat(30))));
    }

    #[tokio::test]
    async fn countdown_write_failure_still_waits() {
        let mut out = BrokenPipe { attempts: 0 };
        let started = Instant::now();
        countdown_on(&mut out, Duration::from_secs(1)).await;

        assert!(started.elapsed() >= Duration::from_secs(1));
        // no redraws after the first failure
        assert_eq!(out.attempts, 1);
    }
}
