// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! # VitaBand Monitoring Engine
//!
//! Everything between a feature snapshot and an emitted recommendation:
//! the [`Predictor`]/[`Scaler`] boundary with its output-normalization
//! contract, the label classifier, the recommendation composer, the
//! best-effort publish/announce sinks, the CSV cycle log and the
//! [`MonitorCycle`] loop that strings them together.
//!
//! Error policy follows three tiers: init failures (scaler artifact,
//! log file) are fatal; prediction failures degrade the current cycle
//! to an empty label set; sink failures are warned and ignored.

pub mod classifier;
pub mod composer;
pub mod csv_log;
pub mod cycle;
pub mod predictor;
pub mod rule_based;
pub mod sinks;

pub use classifier::{Classification, LabelClassifier};
pub use composer::{priority_for, Intensity, OutputMode, RecommendationComposer};
pub use csv_log::CycleLog;
pub use cycle::{CycleOutcome, MonitorCycle};
pub use predictor::{
    normalize_prediction, run_prediction, Predictor, RawPrediction, Scaler, StandardScaler,
};
pub use rule_based::RuleBasedPredictor;
pub use sinks::{publish_health_update, AnnounceSink, PublishSink};

use std::path::PathBuf;

use thiserror::Error;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised by the monitoring engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The scaler artifact could not be read.
    #[error("failed to read scaler artifact {path}: {source}")]
    ScalerRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The scaler artifact is not valid JSON or has the wrong shape.
    #[error("invalid scaler artifact {path}: {reason}")]
    ScalerFormat { path: PathBuf, reason: String },
    /// Model invocation failed; recoverable within a cycle.
    #[error("prediction failed: {0}")]
    Prediction(String),
    /// The cycle log file could not be opened. Fatal at init.
    #[error("cannot open cycle log {path}: {source}")]
    LogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A row could not be appended to the cycle log.
    #[error("cycle log write failed: {0}")]
    LogWrite(#[from] std::io::Error),
    /// A publish or announce sink reported failure. Never fatal.
    #[error("sink '{name}' failed: {reason}")]
    Sink { name: String, reason: String },
}
