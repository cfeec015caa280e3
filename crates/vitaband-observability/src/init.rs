// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization.
//!
//! Creates a timestamped folder per run:
//! ```text
//! ./logs/
//!   └── run_20260829_120000/
//!       └── vitaband.log
//! ```
//! Console output stays human-readable; the file layer is JSON with daily
//! rotation so downstream tooling can ingest it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Keeps the non-blocking writer guards alive; logs flush when dropped.
pub struct LoggingGuard {
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: PathBuf,
}

impl LoggingGuard {
    /// The per-run log directory.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Initialize console + file logging.
///
/// # Arguments
/// * `filter` - tracing filter directive (e.g. "info", "vitaband_sensors=debug,info")
/// * `log_dir` - base directory for logs
/// * `retention_days` - remove runs older than this many days
/// * `retention_runs` - keep at most this many recent runs
pub fn init_logging(
    filter: &str,
    log_dir: &Path,
    retention_days: u64,
    retention_runs: usize,
) -> Result<LoggingGuard> {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_runs(log_dir, retention_days, retention_runs)?;

    let env_filter = EnvFilter::new(filter);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter);

    let file_appender = rolling::daily(&run_folder, "vitaband.log");
    let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(EnvFilter::new(filter));

    Registry::default()
        .with(console_layer.boxed())
        .with(file_layer.boxed())
        .init();

    Ok(LoggingGuard {
        _file_guards: vec![file_guard],
        log_dir: run_folder,
    })
}

/// Remove old `run_*` folders based on the retention policy.
pub fn cleanup_old_runs(base_log_dir: &Path, retention_days: u64, retention_runs: usize) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let cutoff = Utc::now() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(timestamp_str) = dir_name.strip_prefix("run_") else {
            continue;
        };
        if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp_str, "%Y%m%d_%H%M%S") {
            runs.push((path, naive.and_utc()));
        }
    }

    // oldest first
    runs.sort_by_key(|(_, dt)| *dt);

    let mut kept: Vec<&PathBuf> = Vec::new();
    for (path, dt) in &runs {
        if *dt < cutoff {
            if let Err(e) = std::fs::remove_dir_all(path) {
                tracing::warn!("[LOGGING] failed to remove old run {}: {}", path.display(), e);
            }
        } else {
            kept.push(path);
        }
    }

    // age-based cleanup done; now cap the run count, dropping oldest first
    if kept.len() > retention_runs {
        let excess = kept.len() - retention_runs;
        for path in kept.into_iter().take(excess) {
            if let Err(e) = std::fs::remove_dir_all(path) {
                tracing::warn!("[LOGGING] failed to remove old run {}: {}", path.display(), e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_keeps_recent_runs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["run_20200101_000000", "run_20200102_000000"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        // both runs are far older than 30 days
        cleanup_old_runs(dir.path(), 30, 10).unwrap();
        let remaining = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn cleanup_caps_run_count() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        for i in 0..5 {
            let ts = (now - chrono::Duration::hours(i)).format("%Y%m%d_%H%M%S");
            std::fs::create_dir(dir.path().join(format!("run_{ts}"))).unwrap();
        }
        cleanup_old_runs(dir.path(), 30, 2).unwrap();
        let remaining = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(remaining, 2);
    }

    #[test]
    fn cleanup_ignores_unrelated_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("not_a_run")).unwrap();
        std::fs::write(dir.path().join("run_stray.txt"), b"x").unwrap();
        cleanup_old_runs(dir.path(), 0, 0).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
