// src/stats/sink.rs
use crate::stats::report::{Report, Style};
use crate::utils::error::MonitorError;
use std::io::{self, Write};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Destination for rendered reports
///
/// Sinks are handed to the monitors and the loop at construction time;
/// nothing looks them up globally.
pub trait ReportSink: Send {
    /// Writes one report, padding the hostname column to `width`
    fn emit(&mut self, report: &Report, width: usize) -> io::Result<()>;

    /// Writes a line that is not tied to a device (separators)
    fn emit_line(&mut self, line: &str) -> io::Result<()>;
}

/// Writes reports with a given style to any writer
pub struct WriterSink<W: Write + Send> {
    writer: W,
    style: Style,
}

impl<W: Write + Send> WriterSink<W> {
    /// Creates a sink rendering reports in `style` into `writer`
    pub fn new(writer: W, style: Style) -> Self {
        WriterSink { writer, style }
    }

    /// Returns the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ReportSink for WriterSink<W> {
    fn emit(&mut self, report: &Report, width: usize) -> io::Result<()> {
        for line in report.render(self.style, width) {
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()
    }

    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}

/// Styled sink writing to stdout
pub type ConsoleSink = WriterSink<io::Stdout>;

/// Plain sink writing to a daily rolling log file
pub type FileSink = WriterSink<RollingFileAppender>;

/// Creates the console sink
pub fn console() -> ConsoleSink {
    WriterSink::new(io::stdout(), Style::Styled)
}

/// Opens the rolling log file for one device
///
/// Files are named `bitaxe_<ip>.<date>.log` inside `dir` and rotate at
/// midnight; `retain_days` old files are kept next to the current one.
pub fn device_log(dir: &Path, ip: &str, retain_days: usize) -> Result<FileSink, MonitorError> {
    std::fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(format!("bitaxe_{}", ip.replace([':', '/'], "_")))
        .filename_suffix("log")
        .max_log_files(retain_days.saturating_add(1))
        .build(dir)?;

    Ok(WriterSink::new(appender, Style::Plain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::snapshot::StatusSnapshot;
    use chrono::Local;

    fn report() -> Report {
        let mut snapshot = StatusSnapshot::unavailable(Local::now());
        snapshot.hostname = Some("axe".to_string());
        snapshot.shares_accepted = 9;
        Report {
            ip: "10.0.0.9".to_string(),
            snapshot,
            restart_count: 0,
            events: Vec::new(),
        }
    }

    #[test]
    fn writer_sink_renders_lines() {
        let mut sink = WriterSink::new(Vec::new(), Style::Plain);
        sink.emit(&report(), 5).unwrap();
        sink.emit_line("-----").unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("axe  : ⏱  Uptime: N/A"));
        assert!(lines[0].contains("Shares: 9"));
        assert_eq!(lines[1], "-----");
    }

    #[test]
    fn device_log_writes_plain_text() {
        colored::control::set_override(true);
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let mut sink = device_log(&logs, "10.0.0.9", 7).unwrap();
        sink.emit(&report(), 0).unwrap();
        drop(sink);

        let files: Vec<_> = std::fs::read_dir(&logs)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("bitaxe_10.0.0.9"));
        assert!(name.ends_with(".log"));

        let contents = std::fs::read_to_string(&files[0]).unwrap();
        assert!(contents.contains("axe: ⏱  Uptime: N/A"));
        assert!(!contents.contains('\u{1b}'));
    }

    #[test]
    fn device_log_accepts_huge_retention() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = device_log(dir.path(), "10.0.0.9", usize::MAX).unwrap();
        sink.emit(&report(), 0).unwrap();
    }
}
