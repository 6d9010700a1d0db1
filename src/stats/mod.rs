//! Status snapshots and report output
//!
//! This module turns raw device status into something an operator can read:
//! - [`StatusSnapshot`]: the normalized result of one poll
//! - [`Report`]: one cycle's outcome, rendered styled or plain
//! - [`ReportSink`]: console and rolling-file destinations for reports
//!

/// Status snapshot model and numeric formatting helpers
pub mod snapshot;

/// Report record and styled/plain rendering
pub mod report;

/// Report destinations
pub mod sink;

// Re-export main components
pub use report::{Report, ReportEvent, Style};
pub use sink::{ConsoleSink, FileSink, ReportSink, WriterSink};
pub use snapshot::{StatusSnapshot, SystemInfo};
