// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Turns the reading buffer's current state into a model-ready feature
//! vector, filling gaps with training-time defaults.

use tracing::debug;
use vitaband_structures::{FeatureVector, SensorMetric, FEATURE_COUNT};

use crate::reading_buffer::ReadingBuffer;

/// Snapshot assembler for the monitor cycle.
///
/// Stateless apart from the buffer handle; one assembler per pipeline.
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    buffer: ReadingBuffer,
}

impl FeatureAssembler {
    pub fn new(buffer: ReadingBuffer) -> Self {
        Self { buffer }
    }

    /// Assemble the current feature vector. Always succeeds; metrics with
    /// no live reading carry their defaults and are flagged unobserved.
    pub fn assemble(&self) -> FeatureVector {
        let snapshot = self.buffer.snapshot();
        let missing = FEATURE_COUNT - snapshot.observed_count();
        if missing > 0 {
            let names: Vec<&str> = SensorMetric::ALL
                .iter()
                .filter(|m| !snapshot.is_observed(**m))
                .map(|m| m.name())
                .collect();
            debug!("[ASSEMBLER] {missing} metric(s) defaulted: {}", names.join(", "));
        }
        snapshot
    }

    /// Fraction of metrics with at least one live reading, 0.0 to 1.0.
    pub fn coverage(&self) -> f64 {
        self.buffer.observed_count() as f64 / FEATURE_COUNT as f64
    }

    /// Per-metric freshness: which source last fed each live metric and
    /// how long ago. Metrics still on their defaults are absent.
    pub fn sensor_status(&self) -> Vec<(SensorMetric, String, chrono::Duration)> {
        self.buffer.status(chrono::Utc::now())
    }
}
