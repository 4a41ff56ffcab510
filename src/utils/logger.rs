//! Logging initialization and configuration.
//!
//! Logs go to stderr so stdout only ever carries the verdict line. When
//! `PLAN_GATE_LOG_DIR` is set, each run also writes its own log file there,
//! which is handy when the gate runs unattended in CI.
//!
//! # Configuration
//!
//! The log level can be controlled via the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - Show every checked operation
//! - `RUST_LOG=info` - Show the verdict with the plan's task
//! - `RUST_LOG=warn` - Show warnings and errors only (default)
//! - `RUST_LOG=error` - Show errors only

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Local};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a directory for per-run log files.
pub const LOG_DIR_ENV: &str = "PLAN_GATE_LOG_DIR";

/// Initialize the logging system.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// until the process is about to exit.
pub fn init_logging() -> Option<WorkerGuard> {
    // Default to "warn" so a plain run prints nothing but the verdict
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    let log_file = std::env::var_os(LOG_DIR_ENV).and_then(|dir| {
        match open_log_file(Path::new(&dir), Local::now()) {
            Ok(opened) => Some(opened),
            Err(e) => {
                eprintln!("Warning: {:#}", e);
                None
            }
        }
    });

    let (file_layer, guard, log_path) = match log_file {
        Some((file, path)) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // No ANSI colors in log files
                .with_target(true)
                .with_line_number(true);
            (Some(layer), Some(guard), Some(path))
        }
        None => (None, None, None),
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: Failed to initialize logging: {}", e);
        return guard;
    }

    if let Some(path) = log_path {
        tracing::info!("Logging initialized - writing to {}", path.display());
    }

    guard
}

/// Per-run file name, e.g. `plan-gate.2024-12-06-14-30-25.log`.
fn log_file_name(now: DateTime<Local>) -> String {
    format!("plan-gate.{}.log", now.format("%Y-%m-%d-%H-%M-%S"))
}

fn open_log_file(dir: &Path, now: DateTime<Local>) -> anyhow::Result<(fs::File, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
    let path = dir.join(log_file_name(now));
    let file = fs::File::create(&path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    Ok((file, path))
}
