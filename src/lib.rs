// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! # VitaBand - Wearable Health Monitoring Pipeline
//!
//! VitaBand continuously fuses physiological and environmental sensor
//! streams, classifies the wearer's state against a fixed 24-label
//! taxonomy and composes humanized, priority-tagged recommendations.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! vitaband = "0.1"
//! ```
//!
//! ```rust,no_run
//! use vitaband::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let buffer = ReadingBuffer::new();
//! let config = vitaband::config::load_config(None)?;
//! let mut supervisor = SensorSupervisor::start(
//!     &config.sensors.sources,
//!     buffer.clone(),
//!     SupervisorOptions::from_config(&config.sensors),
//! )?;
//!
//! let scaler = StandardScaler::identity();
//! let mut cycle = MonitorCycle::new(
//!     FeatureAssembler::new(buffer),
//!     Box::new(scaler.clone()),
//!     Box::new(RuleBasedPredictor::new(scaler)),
//!     RecommendationComposer::new(OutputMode::Detailed),
//! );
//! let outcome = cycle.run_cycle();
//! println!("{}", outcome.recommendation.full_message);
//! supervisor.stop();
//! # Ok(())
//! # }
//! ```
//!
//! ## Components
//!
//! - [`structures`]: feature schema, label taxonomy, readings, results
//! - [`config`]: TOML configuration with environment overrides
//! - [`observability`]: run-scoped logging with retention cleanup
//! - [`sensors`]: subprocess supervision and the reading buffer
//! - [`engine`]: prediction, classification, recommendation, cycle loop

pub use vitaband_config as config;
pub use vitaband_engine as engine;
pub use vitaband_observability as observability;
pub use vitaband_sensors as sensors;
pub use vitaband_structures as structures;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Most commonly used types, re-exported flat.
pub mod prelude {
    pub use vitaband_config::{load_config, VitabandConfig};
    pub use vitaband_engine::{
        CycleLog, CycleOutcome, Intensity, LabelClassifier, MonitorCycle, OutputMode, Predictor,
        RecommendationComposer, RuleBasedPredictor, Scaler, StandardScaler,
    };
    pub use vitaband_observability::init_logging;
    pub use vitaband_sensors::{
        FeatureAssembler, ReadingBuffer, SensorSupervisor, SupervisorOptions,
    };
    pub use vitaband_structures::{
        FeatureVector, Label, LabelClass, PredictionResult, PriorityLevel, Reading,
        Recommendation, SensorMetric, FEATURE_COUNT, LABEL_COUNT,
    };
}
