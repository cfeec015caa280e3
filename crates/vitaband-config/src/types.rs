// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions.
//!
//! Each struct maps to one section of `vitaband_configuration.toml`. All
//! sections carry serde defaults so a partial file (or no file at all)
//! still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VitabandConfig {
    pub monitor: MonitorConfig,
    pub sensors: SensorsConfig,
    pub model: ModelConfig,
    pub mqtt: MqttConfig,
    pub mdns: MdnsConfig,
    pub logging: LoggingConfig,
}

/// Monitoring loop configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between polling cycles
    pub poll_interval_secs: f64,
    /// Directory for the append-only CSV activity log
    pub log_dir: PathBuf,
    /// Recommendation verbosity: "short" or "detailed"
    pub recommendation_mode: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5.0,
            log_dir: PathBuf::from("data"),
            recommendation_mode: "detailed".to_string(),
        }
    }
}

/// One sensor source: an external process whose stdout is the data feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorSourceConfig {
    /// Source name, also selects the parse rules ("ds18b20", "bme280",
    /// "mpu6050", "max30102")
    pub name: String,
    /// Executable to launch
    pub command: String,
    /// Arguments passed to the executable
    #[serde(default)]
    pub args: Vec<String>,
}

/// Sensor supervision configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorsConfig {
    pub sources: Vec<SensorSourceConfig>,
    /// Bounded wait on the aggregator's queue so shutdown stays prompt
    pub queue_wait_ms: u64,
    /// Grace period for child processes before force-kill
    pub shutdown_grace_secs: u64,
}

impl Default for SensorsConfig {
    fn default() -> Self {
        let script = |path: &str| SensorSourceConfig {
            name: path
                .rsplit('/')
                .next()
                .unwrap_or(path)
                .trim_end_matches("_sensor.py")
                .to_string(),
            command: "python3".to_string(),
            args: vec![path.to_string()],
        };
        Self {
            sources: vec![
                script("sensors/max30102_sensor.py"),
                script("sensors/ds18b20_sensor.py"),
                script("sensors/bme280_sensor.py"),
                script("sensors/mpu6050_sensor.py"),
            ],
            queue_wait_ms: 500,
            shutdown_grace_secs: 2,
        }
    }
}

/// Model artifact locations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// JSON file holding the fitted scaler's mean/scale arrays
    pub scaler_path: PathBuf,
    /// Optional path to an external model artifact; the built-in heuristic
    /// predictor is used when unset
    pub model_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("model/scaler.json"),
            model_path: None,
        }
    }
}

/// MQTT publish sink configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MqttConfig {
    pub enabled: bool,
    pub broker_host: String,
    pub broker_port: u16,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            broker_host: "localhost".to_string(),
            broker_port: 1883,
        }
    }
}

/// mDNS service-announcement configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MdnsConfig {
    pub enabled: bool,
    pub service_name: String,
    pub port: u16,
}

impl Default for MdnsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: "VitaBand".to_string(),
            port: 1883,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base directory for rotated log files
    pub log_dir: PathBuf,
    /// tracing filter directive, e.g. "info" or "vitaband_sensors=debug,info"
    pub filter: String,
    /// Keep log runs for this many days
    pub retention_days: u64,
    /// Keep at most this many recent runs
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            filter: "info".to_string(),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
