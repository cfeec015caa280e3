// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Model boundary: feature scaling, the [`Predictor`] trait and the
//! output-normalization contract.
//!
//! The engine does not implement the statistical model; it implements
//! the contract for interpreting whatever the model returns. Raw output
//! shape is not guaranteed, so normalization is a total function:
//! flatten, binarize, reconcile length, and fall back to all-zero on
//! anything unusable. A single bad prediction must never halt
//! monitoring.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;
use vitaband_structures::{FeatureVector, PredictionResult, FEATURE_COUNT, LABEL_COUNT};

use crate::EngineError;

/// Raw model output before normalization.
///
/// Models differ in what they emit for a single sample: a 2-D
/// single-row matrix, a 1-D vector, or a lone scalar. All three
/// flatten to the same thing.
#[derive(Debug, Clone)]
pub enum RawPrediction {
    Matrix(Vec<Vec<f64>>),
    Vector(Vec<f64>),
    Scalar(f64),
}

impl RawPrediction {
    pub fn flatten(self) -> Vec<f64> {
        match self {
            RawPrediction::Matrix(rows) => rows.into_iter().flatten().collect(),
            RawPrediction::Vector(values) => values,
            RawPrediction::Scalar(value) => vec![value],
        }
    }
}

/// The external model contract: scaled features in, raw output out.
pub trait Predictor: Send {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<RawPrediction, EngineError>;

    /// Short name for logging.
    fn name(&self) -> &str {
        "predictor"
    }
}

/// Feature standardization applied before every prediction.
pub trait Scaler: Send {
    fn transform(&self, features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT];
}

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Mean/variance standardizer with parameters persisted at training time.
///
/// `transform` computes `(x - mean) / scale` per feature; `scale` entries
/// are standard deviations and are validated non-zero at load.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        Self { mean, scale }
    }

    /// Scaler with no effect, for predictors that work in physical units.
    pub fn identity() -> Self {
        Self {
            mean: [0.0; FEATURE_COUNT],
            scale: [1.0; FEATURE_COUNT],
        }
    }

    /// Load the persisted artifact: `{"mean": [...], "scale": [...]}` with
    /// exactly one entry per feature, in feature order.
    pub fn load(path: &Path) -> Result<StandardScaler, EngineError> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::ScalerRead {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ScalerArtifact =
            serde_json::from_str(&text).map_err(|e| EngineError::ScalerFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let format_err = |reason: String| EngineError::ScalerFormat {
            path: path.to_path_buf(),
            reason,
        };
        let mean: [f64; FEATURE_COUNT] = artifact.mean.try_into().map_err(|v: Vec<f64>| {
            format_err(format!("mean has {} entries, expected {FEATURE_COUNT}", v.len()))
        })?;
        let scale: [f64; FEATURE_COUNT] = artifact.scale.try_into().map_err(|v: Vec<f64>| {
            format_err(format!("scale has {} entries, expected {FEATURE_COUNT}", v.len()))
        })?;
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(format_err("non-finite scaler parameter".to_string()));
        }
        if scale.iter().any(|s| *s == 0.0) {
            return Err(format_err("zero entry in scale vector".to_string()));
        }
        Ok(StandardScaler { mean, scale })
    }

    /// Undo the transform, recovering physical units from scaled values.
    pub fn inverse(&self, scaled: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = scaled[i] * self.scale[i] + self.mean[i];
        }
        out
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (features[i] - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// Normalize raw model output to exactly one bit per taxonomy label.
///
/// Binarization: if any flattened value lies in `[0.0, 1.0]` the whole
/// vector is treated as probabilities and thresholded at `>= 0.5`;
/// otherwise values are treated as integral indicators and any non-zero
/// entry activates its label. The probability branch is known to also
/// capture genuinely integral vectors that contain only 0s and 1s; both
/// readings binarize those identically, so the ambiguity is harmless
/// there, but a mixed vector like `[0.0, 3.0]` does take the
/// probability path.
///
/// Shorter vectors are right-padded with zeros, longer ones truncated.
pub fn normalize_prediction(raw: RawPrediction) -> [u8; LABEL_COUNT] {
    let flat = raw.flatten();
    let mut bits = [0u8; LABEL_COUNT];
    if flat.is_empty() {
        return bits;
    }
    let probability_like = flat.iter().any(|v| (0.0..=1.0).contains(v));
    for (slot, value) in bits.iter_mut().zip(flat.iter()) {
        let active = if probability_like {
            *value >= 0.5
        } else {
            value.is_finite() && *value as i64 != 0
        };
        *slot = u8::from(active);
    }
    bits
}

/// Scale, predict and normalize one snapshot.
///
/// Prediction failure is cycle-recoverable: the result degrades to an
/// empty label set and the failure is logged.
pub fn run_prediction(
    predictor: &dyn Predictor,
    scaler: &dyn Scaler,
    snapshot: FeatureVector,
) -> PredictionResult {
    let scaled = scaler.transform(snapshot.as_array());
    match predictor.predict(&scaled) {
        Ok(raw) => PredictionResult::from_binary_vector(normalize_prediction(raw), snapshot),
        Err(err) => {
            warn!("[PREDICT] {} failed, carrying empty label set: {err}", predictor.name());
            PredictionResult::empty(snapshot)
        }
    }
}
