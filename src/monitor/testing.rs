// src/monitor/testing.rs
//! Scripted devices and in-memory sinks for monitor tests

use crate::network::DeviceApi;
use crate::stats::{Report, ReportSink, StatusSnapshot, Style};
use crate::types::RestartOutcome;
use crate::utils::error::MonitorError;
use chrono::Local;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One scripted status read
#[derive(Debug, Clone)]
pub enum Step {
    Shares(u64),
    Fail,
}

#[derive(Debug)]
struct Script {
    steps: Mutex<VecDeque<Step>>,
    restart: Mutex<RestartOutcome>,
    restart_calls: AtomicUsize,
}

/// Device that replays a fixed list of status reads
#[derive(Debug, Clone)]
pub struct ScriptedDevice {
    ip: String,
    hostname: String,
    script: Arc<Script>,
}

impl ScriptedDevice {
    pub fn new(ip: &str, steps: Vec<Step>) -> Self {
        ScriptedDevice {
            ip: ip.to_string(),
            hostname: format!("axe-{}", ip),
            script: Arc::new(Script {
                steps: Mutex::new(steps.into()),
                restart: Mutex::new(RestartOutcome::Succeeded),
                restart_calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_string();
        self
    }

    pub fn with_restart(self, outcome: RestartOutcome) -> Self {
        *self.script.restart.lock().unwrap() = outcome;
        self
    }

    pub fn restart_calls(&self) -> usize {
        self.script.restart_calls.load(Ordering::SeqCst)
    }
}

impl DeviceApi for ScriptedDevice {
    fn ip(&self) -> &str {
        &self.ip
    }

    async fn fetch_status(&self) -> Result<StatusSnapshot, MonitorError> {
        let step = self.script.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Shares(shares)) => {
                let mut snapshot = StatusSnapshot::unavailable(Local::now());
                snapshot.hostname = Some(self.hostname.clone());
                snapshot.shares_accepted = shares;
                Ok(snapshot)
            }
            Some(Step::Fail) | None => Err(MonitorError::FetchError("scripted failure".into())),
        }
    }

    async fn send_restart(&self) -> RestartOutcome {
        self.script.restart_calls.fetch_add(1, Ordering::SeqCst);
        self.script.restart.lock().unwrap().clone()
    }
}

/// Sink collecting plain rendered lines
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ReportSink for MemorySink {
    fn emit(&mut self, report: &Report, width: usize) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap()
            .extend(report.render(Style::Plain, width));
        Ok(())
    }

    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}
