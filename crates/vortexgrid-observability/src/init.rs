// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for VortexGrid
//!
//! Console logging is always available. With the `file-logging` feature, runs also
//! get per-crate JSON log files in a timestamped folder with configurable retention.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;

#[cfg(feature = "file-logging")]
pub use file::{init_logging, LoggingGuard};

/// Install a console-only subscriber
///
/// `base_level` applies to every target without a `--debug-*` flag.
pub fn init_console_logging(debug_flags: &CrateDebugFlags, base_level: &str) -> Result<()> {
    let filter = build_filter(debug_flags, base_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install console subscriber: {}", e))
}

fn build_filter(debug_flags: &CrateDebugFlags, base_level: &str) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string_with_base(base_level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

#[cfg(feature = "file-logging")]
mod file {
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use chrono::{DateTime, NaiveDateTime, Utc};
    use tracing_appender::non_blocking::WorkerGuard;
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer, Registry};

    use super::build_filter;
    use crate::cli::CrateDebugFlags;

    const RUN_PREFIX: &str = "run_";
    const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Logging initialization result
    ///
    /// Dropping the guard flushes the non-blocking file writers.
    pub struct LoggingGuard {
        _file_guards: Vec<WorkerGuard>,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        /// Get the log directory path of this run
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }
    }

    /// Initialize logging with file output and console output
    ///
    /// Creates a timestamped folder structure:
    /// ```text
    /// ./logs/
    ///   └── run_20250101_120000/
    ///       ├── vortexgrid-structures.log
    ///       ├── vortexgrid-serialization.log
    ///       ├── generate_bricks.log
    ///       └── vortexgrid.log (combined)
    /// ```
    ///
    /// # Arguments
    /// * `debug_flags` - Per-crate debug flags for filtering
    /// * `base_level` - Level for targets without a debug flag
    /// * `log_dir` - Base directory for logs (default: `./logs`)
    /// * `retention_days` - Keep logs for N days (default: 30)
    /// * `retention_runs` - Keep N most recent runs (default: 10)
    pub fn init_logging(
        debug_flags: &CrateDebugFlags,
        base_level: &str,
        log_dir: Option<PathBuf>,
        retention_days: Option<u64>,
        retention_runs: Option<usize>,
    ) -> Result<LoggingGuard> {
        let base_log_dir = log_dir.unwrap_or_else(|| PathBuf::from("./logs"));

        let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
        let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        cleanup_old_logs(
            &base_log_dir,
            &run_folder,
            retention_days.unwrap_or(30),
            retention_runs.unwrap_or(10),
        )?;

        let mut layers = Vec::new();
        let mut file_guards = Vec::new();

        // Console layer (human-readable)
        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(build_filter(debug_flags, base_level)?)
            .boxed();
        layers.push(console_layer);

        for crate_name in crate::KNOWN_CRATES {
            let file_appender = rolling::never(&run_folder, format!("{}.log", crate_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            file_guards.push(guard);

            let crate_level = if debug_flags.is_enabled(crate_name) { "debug" } else { "info" };
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(EnvFilter::try_new(format!("off,{}={}", crate_name, crate_level))?)
                .boxed();
            layers.push(file_layer);
        }

        let combined_appender = rolling::never(&run_folder, "vortexgrid.log");
        let (combined_non_blocking, combined_guard) = tracing_appender::non_blocking(combined_appender);
        file_guards.push(combined_guard);

        let combined_layer = tracing_subscriber::fmt::layer()
            .with_writer(combined_non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(build_filter(debug_flags, base_level)?)
            .boxed();
        layers.push(combined_layer);

        Registry::default()
            .with(layers)
            .try_init()
            .context("Failed to install logging subscriber")?;

        Ok(LoggingGuard {
            _file_guards: file_guards,
            log_dir: run_folder,
        })
    }

    /// Remove run folders older than `retention_days`, then all but the newest
    /// `retention_runs`. `current_run` is never removed. Returns the number of
    /// folders removed.
    fn cleanup_old_logs(
        base_log_dir: &Path,
        current_run: &Path,
        retention_days: u64,
        retention_runs: usize,
    ) -> Result<usize> {
        if !base_log_dir.exists() {
            return Ok(0);
        }

        let cutoff_date = Utc::now() - chrono::Duration::days(retention_days as i64);

        let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
        for entry in std::fs::read_dir(base_log_dir)? {
            let path = entry?.path();
            if !path.is_dir() || path == current_run {
                continue;
            }
            let started = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(RUN_PREFIX))
                .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_TIMESTAMP_FORMAT).ok());
            if let Some(started) = started {
                runs.push((path, started.and_utc()));
            }
        }

        // Newest first
        runs.sort_by(|a, b| b.1.cmp(&a.1));

        // The current run occupies the first retained slot
        let retained_slots = retention_runs.saturating_sub(1);
        let mut removed_count = 0;
        for (rank, (path, started)) in runs.iter().enumerate() {
            if *started >= cutoff_date && rank < retained_slots {
                continue;
            }
            match std::fs::remove_dir_all(path) {
                Ok(()) => removed_count += 1,
                Err(e) => eprintln!(
                    "Warning: Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                ),
            }
        }

        Ok(removed_count)
    }

}
