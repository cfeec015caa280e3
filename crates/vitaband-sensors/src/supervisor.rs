// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! # Sensor Supervisor
//!
//! Spawns one child process per configured sensor source and manages:
//! 1. A named reader thread per source that parses stdout lines
//! 2. A single aggregator thread that drains the reading queue into
//!    the shared [`ReadingBuffer`]
//! 3. Graceful shutdown: ask each child to terminate, wait out the
//!    grace window, force-kill holdouts, then join every thread with a
//!    bounded wait so a wedged pipe cannot hang the monitor

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};
use vitaband_config::SensorSourceConfig;
use vitaband_structures::Reading;

use crate::reading_buffer::ReadingBuffer;
use crate::stream_parser::{parse_line, SourceKind};
use crate::SensorError;

/// Tunables for the supervisor's queue and shutdown behavior.
#[derive(Debug, Clone)]
pub struct SupervisorOptions {
    /// Bound on how long the aggregator blocks on an empty queue
    /// before re-checking the stop flag.
    pub queue_wait: Duration,
    /// How long to wait for each thread to exit during shutdown.
    pub shutdown_grace: Duration,
}

impl Default for SupervisorOptions {
    fn default() -> Self {
        Self {
            queue_wait: Duration::from_millis(500),
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

impl SupervisorOptions {
    pub fn from_config(config: &vitaband_config::SensorsConfig) -> Self {
        Self {
            queue_wait: Duration::from_millis(config.queue_wait_ms),
            shutdown_grace: Duration::from_secs(config.shutdown_grace_secs),
        }
    }
}

struct SourceHandle {
    name: String,
    child: Arc<Mutex<Child>>,
    reader: JoinHandle<()>,
}

/// Owns the sensor subprocesses and their reader threads.
pub struct SensorSupervisor {
    stop_flag: Arc<AtomicBool>,
    sources: Vec<SourceHandle>,
    aggregator: Option<JoinHandle<()>>,
    options: SupervisorOptions,
}

impl SensorSupervisor {
    /// Launch every configured source and the aggregator.
    ///
    /// Sources with an unknown name or a command that fails to spawn are
    /// skipped with a warning; the pipeline runs degraded on whatever
    /// started. Zero started sources is fatal.
    pub fn start(
        configs: &[SensorSourceConfig],
        buffer: ReadingBuffer,
        options: SupervisorOptions,
    ) -> Result<SensorSupervisor, SensorError> {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let (tx, rx) = channel::unbounded::<Reading>();

        let mut sources = Vec::with_capacity(configs.len());
        for config in configs {
            let kind = match SourceKind::from_name(&config.name) {
                Ok(kind) => kind,
                Err(err) => {
                    warn!("[SENSORS] Skipping source: {err}");
                    continue;
                }
            };
            match spawn_source(config, kind, tx.clone(), stop_flag.clone()) {
                Ok(handle) => {
                    info!("[SENSORS] Started source '{}'", config.name);
                    sources.push(handle);
                }
                Err(err) => {
                    warn!("[SENSORS] Failed to start source '{}': {err}", config.name);
                }
            }
        }
        // dropping our copy lets the aggregator see disconnect once all
        // reader threads are gone
        drop(tx);

        if sources.is_empty() {
            return Err(SensorError::NoSourcesStarted);
        }

        let aggregator = spawn_aggregator(rx, buffer, stop_flag.clone(), options.queue_wait)?;
        info!("[SENSORS] Supervisor running with {} source(s)", sources.len());

        Ok(SensorSupervisor {
            stop_flag,
            sources,
            aggregator: Some(aggregator),
            options,
        })
    }

    pub fn is_running(&self) -> bool {
        !self.stop_flag.load(Ordering::Acquire)
    }

    /// Stop all sources and the aggregator.
    ///
    /// Every child receives a termination request first; whatever is
    /// still alive when the grace window closes is force-killed. Reader
    /// threads hit EOF as the children exit, then every thread is joined
    /// with the same bounded wait.
    pub fn stop(&mut self) {
        if self.stop_flag.swap(true, Ordering::AcqRel) {
            return;
        }
        info!("[SENSORS] Stopping supervisor...");

        for source in &self.sources {
            request_termination(&mut source.child.lock(), &source.name);
        }

        let deadline = Instant::now() + self.options.shutdown_grace;
        for source in &self.sources {
            let mut child = source.child.lock();
            if !exited_by(&mut child, deadline) {
                warn!(
                    "[SENSORS] '{}' ignored the termination request, killing",
                    source.name
                );
                if let Err(err) = child.kill() {
                    debug!("[SENSORS] Kill '{}' returned: {err}", source.name);
                }
                if let Err(err) = child.wait() {
                    warn!("[SENSORS] Wait for '{}' failed: {err}", source.name);
                }
            }
        }

        let grace = self.options.shutdown_grace;
        for source in self.sources.drain(..) {
            join_with_timeout(source.reader, &source.name, grace);
        }
        if let Some(handle) = self.aggregator.take() {
            join_with_timeout(handle, "sensor-aggregator", grace);
        }
        info!("[SENSORS] Supervisor stopped");
    }
}

impl Drop for SensorSupervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_source(
    config: &SensorSourceConfig,
    kind: SourceKind,
    tx: Sender<Reading>,
    stop_flag: Arc<AtomicBool>,
) -> Result<SourceHandle, SensorError> {
    let mut child = Command::new(&config.command)
        .args(&config.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| SensorError::ThreadSpawn {
            name: config.name.clone(),
            source,
        })?;

    // stdout is always present with Stdio::piped; treat its absence as a
    // dead child
    let stdout = child.stdout.take().ok_or_else(|| SensorError::ThreadSpawn {
        name: config.name.clone(),
        source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "child stdout not captured"),
    })?;

    let name = config.name.clone();
    let thread_name = name.clone();
    let reader = thread::Builder::new()
        .name(format!("sensor-{thread_name}"))
        .spawn(move || {
            reader_loop(kind, &thread_name, stdout, tx, stop_flag);
        })
        .map_err(|source| SensorError::ThreadSpawn {
            name: name.clone(),
            source,
        })?;

    Ok(SourceHandle {
        name,
        child: Arc::new(Mutex::new(child)),
        reader,
    })
}

fn reader_loop(
    kind: SourceKind,
    source_name: &str,
    stdout: std::process::ChildStdout,
    tx: Sender<Reading>,
    stop_flag: Arc<AtomicBool>,
) {
    let reader = BufReader::new(stdout);
    for line in reader.lines() {
        if stop_flag.load(Ordering::Acquire) {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                // killed child, broken pipe; normal during shutdown
                debug!("[SENSORS] '{source_name}' read error: {err}");
                break;
            }
        };
        for (metric, value) in parse_line(kind, &line) {
            let reading = Reading::new(source_name, metric, value);
            if tx.send(reading).is_err() {
                return;
            }
        }
    }
    debug!("[SENSORS] Reader for '{source_name}' exiting");
}

fn spawn_aggregator(
    rx: Receiver<Reading>,
    buffer: ReadingBuffer,
    stop_flag: Arc<AtomicBool>,
    queue_wait: Duration,
) -> Result<JoinHandle<()>, SensorError> {
    thread::Builder::new()
        .name("sensor-aggregator".to_string())
        .spawn(move || {
            aggregator_loop(rx, buffer, stop_flag, queue_wait);
        })
        .map_err(|source| SensorError::ThreadSpawn {
            name: "sensor-aggregator".to_string(),
            source,
        })
}

fn aggregator_loop(
    rx: Receiver<Reading>,
    buffer: ReadingBuffer,
    stop_flag: Arc<AtomicBool>,
    queue_wait: Duration,
) {
    loop {
        match rx.recv_timeout(queue_wait) {
            Ok(reading) => {
                if !buffer.store(&reading) {
                    debug!(
                        "[SENSORS] Dropped unparseable value {:?} for {} from '{}'",
                        reading.value, reading.metric, reading.source
                    );
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if stop_flag.load(Ordering::Acquire) {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("[SENSORS] Aggregator exiting");
}

/// Ask a child to exit on its own terms, ahead of any force kill.
#[cfg(unix)]
fn request_termination(child: &mut Child, name: &str) {
    let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGTERM) };
    if rc != 0 {
        debug!("[SENSORS] Termination request for '{name}' returned {rc}");
    }
}

#[cfg(not(unix))]
fn request_termination(child: &mut Child, name: &str) {
    if let Err(err) = child.kill() {
        debug!("[SENSORS] Kill '{name}' returned: {err}");
    }
}

/// Poll `try_wait` until the child exits or the deadline passes.
fn exited_by(child: &mut Child, deadline: Instant) -> bool {
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return true,
            Ok(None) => {
                if Instant::now() >= deadline {
                    return false;
                }
                thread::sleep(Duration::from_millis(25));
            }
            Err(err) => {
                debug!("[SENSORS] Reaping child returned: {err}");
                return true;
            }
        }
    }
}

/// Join with a bounded wait. `JoinHandle` has no timeout, so a helper
/// thread performs the join and signals over a channel.
fn join_with_timeout(handle: JoinHandle<()>, name: &str, timeout: Duration) {
    let (tx, rx) = std::sync::mpsc::channel();
    let joiner = thread::spawn(move || {
        let result = handle.join();
        let _ = tx.send(result);
    });
    match rx.recv_timeout(timeout) {
        Ok(Ok(())) => debug!("[SENSORS] Thread '{name}' joined"),
        Ok(Err(_)) => error!("[SENSORS] Thread '{name}' panicked"),
        Err(_) => warn!("[SENSORS] Thread '{name}' did not stop within {timeout:?}"),
    }
    drop(joiner);
}
