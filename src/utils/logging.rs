// src/utils/logging.rs
//! Diagnostic logging setup
//!
//! Diagnostics go through the `log` facade and are printed by `env_logger`.
//! Device reports do not use this path; they are written to the
//! [`ReportSink`](crate::stats::ReportSink) handles owned by each monitor.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

/// Initializes the logging subsystem
///
/// # Configuration
/// - Logs to stdout
/// - Default log level: Info
/// - Respects `RUST_LOG` environment variable if set
pub fn init_logging() {
    let mut builder = common_log_config();

    if env::var("RUST_LOG").is_err() {
        builder.filter_level(LevelFilter::Info);
    } else {
        builder.parse_env("RUST_LOG");
    }

    builder.init();
}

/// Creates a base logger builder with the `[ts level module:line] msg` format
fn common_log_config() -> Builder {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            use std::io::Write;
            let ts = buf.timestamp_seconds();
            let level = record.level();
            let module = record.module_path().unwrap_or_default();
            let line = record.line().unwrap_or(0);

            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                ts,
                level,
                module,
                line,
                record.args()
            )
        })
        .target(Target::Stdout);

    builder
}
