// src/types.rs
use crate::stats::Report;
use reqwest::StatusCode;
use std::fmt;

/// Result of asking a device to restart
///
/// Restart requests are never retried here; a device that keeps
/// flatlining is simply asked again on the next cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartOutcome {
    /// Device answered the restart request with HTTP 200
    Succeeded,

    /// Device answered with any other status code
    RejectedByDevice(StatusCode),

    /// Request never got a response (timeout, refused connection, ...)
    TransportFailed(String),
}

impl RestartOutcome {
    /// Whether the restart command was accepted by the device
    pub fn is_success(&self) -> bool {
        matches!(self, RestartOutcome::Succeeded)
    }
}

impl fmt::Display for RestartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartOutcome::Succeeded => write!(f, "restart sent"),
            RestartOutcome::RejectedByDevice(code) => write!(f, "rejected with {}", code.as_u16()),
            RestartOutcome::TransportFailed(detail) => write!(f, "transport failure: {}", detail),
        }
    }
}

/// Outcome of a single poll-evaluate-report-restart cycle
#[derive(Debug, Clone)]
pub struct CycleResult {
    /// A restart command was accepted during this cycle
    pub restarted: bool,
    /// The status read failed; no stagnation check ran
    pub fetch_failed: bool,
    /// Report produced by the cycle, ready to be rendered
    pub report: Report,
}
