// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! `vitaband-monitor`: the continuous monitoring daemon.
//!
//! Wires the whole pipeline together: configuration, logging, the
//! sensor supervisor, the predictor and the cycle loop, with a Ctrl+C
//! handler for orderly shutdown.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use vitaband_engine::{
    AnnounceSink, CycleLog, EngineError, MonitorCycle, OutputMode, Predictor, PublishSink,
    RecommendationComposer, RuleBasedPredictor, StandardScaler,
};
use vitaband_sensors::{FeatureAssembler, ReadingBuffer, SensorSupervisor, SupervisorOptions};

/// VitaBand health monitor - sensor fusion, classification and recommendations
#[derive(Parser, Debug)]
#[command(name = "vitaband-monitor", version, author, long_about = None)]
struct Args {
    /// Path to the configuration file (default: search for
    /// vitaband_configuration.toml upward from the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between monitoring cycles (overrides configuration)
    #[arg(long)]
    poll_interval: Option<f64>,

    /// Stop after this many cycles (default: run until Ctrl+C)
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Recommendation output mode: "short" or "detailed"
    #[arg(long)]
    mode: Option<String>,

    /// Log filter directive (overrides configuration, e.g. "debug")
    #[arg(long)]
    log_filter: Option<String>,
}

/// Publish transport used when no broker client is linked in: payloads
/// go to the structured log so downstream formats stay observable.
struct TracingPublishSink;

impl PublishSink for TracingPublishSink {
    fn publish(&self, topic: &str, payload: &serde_json::Value) -> Result<(), EngineError> {
        info!("[PUBLISH] {topic}: {payload}");
        Ok(())
    }
}

struct TracingAnnounceSink;

impl AnnounceSink for TracingAnnounceSink {
    fn announce(&self, service_name: &str, port: u16) -> Result<(), EngineError> {
        info!("[MDNS] Advertising '{service_name}' on port {port}");
        Ok(())
    }

    fn withdraw(&self) {
        info!("[MDNS] Advertisement withdrawn");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = vitaband_config::load_config(args.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(interval) = args.poll_interval {
        config.monitor.poll_interval_secs = interval;
    }
    if let Some(mode) = &args.mode {
        config.monitor.recommendation_mode = mode.clone();
    }
    if let Some(filter) = &args.log_filter {
        config.logging.filter = filter.clone();
    }
    vitaband_config::validate_config(&config).context("invalid configuration")?;

    print_banner();

    let _logging_guard = vitaband_observability::init_logging(
        &config.logging.filter,
        &config.logging.log_dir,
        config.logging.retention_days,
        config.logging.retention_runs,
    )
    .context("failed to initialize logging")?;

    info!("[INIT] ===== INITIALIZING VITABAND MONITOR v{} =====", vitaband::VERSION);

    // 1) ML artifacts
    let scaler = load_scaler(&config)?;
    if let Some(notice) = external_model_notice(&config) {
        warn!("[INIT] {notice}");
    }
    let predictor: Box<dyn Predictor> = Box::new(RuleBasedPredictor::new(scaler.clone()));
    info!("[INIT] Predictor ready: rule-based");

    let mode = OutputMode::from_name(&config.monitor.recommendation_mode)
        .unwrap_or(OutputMode::Detailed);

    // 2) Cycle log
    let log_path = config.monitor.log_dir.join(format!(
        "health_log_{}.csv",
        chrono_timestamp()
    ));
    let cycle_log = CycleLog::create(&log_path)?;
    info!("[INIT] Logging cycles to {}", cycle_log.path().display());

    // 3) Sensor supervision
    let buffer = ReadingBuffer::new();
    let mut supervisor = SensorSupervisor::start(
        &config.sensors.sources,
        buffer.clone(),
        SupervisorOptions::from_config(&config.sensors),
    )
    .context("failed to start sensor supervision")?;

    // 4) Optional outward sinks
    let announce_sink = config.mdns.enabled.then_some(TracingAnnounceSink);
    if let Some(sink) = &announce_sink {
        if let Err(err) = sink.announce(&config.mdns.service_name, config.mdns.port) {
            warn!("[INIT] Service announcement failed (continuing): {err}");
        }
    }

    let mut cycle = MonitorCycle::new(
        FeatureAssembler::new(buffer),
        Box::new(scaler),
        predictor,
        RecommendationComposer::new(mode),
    )
    .with_cycle_log(cycle_log);
    if config.mqtt.enabled {
        info!(
            "[INIT] Publishing enabled (configured broker {}:{})",
            config.mqtt.broker_host, config.mqtt.broker_port
        );
        cycle = cycle.with_publish_sink(Box::new(TracingPublishSink));
    }

    // 5) Shutdown signal
    let stop_flag = Arc::new(AtomicBool::new(false));
    let handler_flag = stop_flag.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::Release);
    })
    .context("failed to install Ctrl+C handler")?;

    info!("[INIT] System ready, press Ctrl+C to stop");

    let poll_interval = Duration::from_secs_f64(config.monitor.poll_interval_secs);
    cycle.run_loop(&stop_flag, poll_interval, args.max_cycles);

    // orderly shutdown
    supervisor.stop();
    if let Some(sink) = &announce_sink {
        sink.withdraw();
    }
    info!("[SHUTDOWN] Monitor stopped after {} cycle(s)", cycle.cycle_count());
    Ok(())
}

/// Load the persisted scaler, or fall back to the identity scaler when
/// no artifact exists and no external model was configured.
fn load_scaler(config: &vitaband_config::VitabandConfig) -> Result<StandardScaler> {
    let path = &config.model.scaler_path;
    if path.is_file() {
        let scaler = StandardScaler::load(path)
            .with_context(|| format!("failed to load scaler from {}", path.display()))?;
        info!("[INIT] Scaler loaded from {}", path.display());
        return Ok(scaler);
    }
    if config.model.model_path.is_some() {
        bail!(
            "model configured but scaler artifact {} is missing",
            path.display()
        );
    }
    info!(
        "[INIT] No scaler artifact at {}, using identity scaling",
        path.display()
    );
    Ok(StandardScaler::identity())
}

/// The only linked prediction runtime is the built-in rule set. When the
/// configuration names an external model this says so out loud, rather
/// than letting the rules stand in for it silently.
fn external_model_notice(config: &vitaband_config::VitabandConfig) -> Option<String> {
    config.model.model_path.as_ref().map(|path| {
        format!(
            "configured model {} has no linked runtime; the built-in rule set will classify instead",
            path.display()
        )
    })
}

fn chrono_timestamp() -> String {
    chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════╗
║                                                          ║
║   VitaBand Monitor v{}                                ║
║   Sensor Fusion - Classification - Recommendations       ║
║                                                          ║
╚══════════════════════════════════════════════════════════╝
    "#,
        env!("CARGO_PKG_VERSION")
    );
}
