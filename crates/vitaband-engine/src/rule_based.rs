// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Deterministic threshold predictor backing the default build.
//!
//! The trait boundary in [`crate::predictor`] is the contract; this
//! implementation lets the full pipeline run end to end without an
//! external model runtime. It receives scaled features like any other
//! predictor and inverts the scaler to apply its thresholds in physical
//! units.

use vitaband_structures::{Label, SensorMetric, FEATURE_COUNT, LABEL_COUNT};

use crate::predictor::{Predictor, RawPrediction, StandardScaler};
use crate::EngineError;

pub struct RuleBasedPredictor {
    scaler: StandardScaler,
}

impl RuleBasedPredictor {
    /// `scaler` must be the same scaler the pipeline applies before
    /// `predict`, so the thresholds see physical units.
    pub fn new(scaler: StandardScaler) -> Self {
        Self { scaler }
    }
}

impl Predictor for RuleBasedPredictor {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<RawPrediction, EngineError> {
        let physical = self.scaler.inverse(features);
        let get = |metric: SensorMetric| physical[metric.index()];

        let body_temp = get(SensorMetric::BodyTemp);
        let ambient = get(SensorMetric::AmbientTemp);
        let pressure = get(SensorMetric::PressureHpa);
        let humidity = get(SensorMetric::HumidityPct);
        let heart_rate = get(SensorMetric::HeartRateBpm);
        let spo2 = get(SensorMetric::Spo2Pct);
        let accel_magnitude = (get(SensorMetric::AccelX).powi(2)
            + get(SensorMetric::AccelY).powi(2)
            + get(SensorMetric::AccelZ).powi(2))
        .sqrt();
        // deviation from 1 g resting gravity
        let motion = (accel_magnitude - 1.0).abs();

        let mut bits = [0.0f64; LABEL_COUNT];
        let mut set = |label: Label| bits[label.index()] = 1.0;

        // activity band from heart rate, refined by motion
        if heart_rate >= 140.0 {
            set(Label::Running);
        } else if heart_rate >= 115.0 {
            set(Label::HighActivity);
        } else if heart_rate >= 95.0 {
            set(Label::ModerateActivity);
        } else if heart_rate >= 80.0 && motion > 0.15 {
            set(Label::Walking);
        } else if heart_rate >= 80.0 {
            set(Label::LightActivity);
        } else if heart_rate < 55.0 && motion < 0.05 {
            set(Label::Sleeping);
        } else if motion < 0.05 {
            set(Label::Sedentary);
        } else {
            set(Label::Resting);
        }

        // physiological conditions
        let mut any_condition = false;
        if body_temp >= 38.0 {
            set(Label::PossibleFever);
            any_condition = true;
        }
        if spo2 < 93.0 {
            set(Label::LowOxygenState);
            any_condition = true;
        }
        if heart_rate >= 150.0 && body_temp >= 37.5 {
            set(Label::Overexertion);
            any_condition = true;
        }
        if ambient >= 32.0 && humidity >= 60.0 && heart_rate >= 100.0 {
            set(Label::Dehydrated);
            any_condition = true;
        }

        // environment
        if ambient >= 32.0 {
            set(Label::HotEnvironment);
        } else if ambient <= 10.0 {
            set(Label::ColdEnvironment);
        }
        if humidity >= 70.0 {
            set(Label::HumidEnvironment);
        }
        if pressure <= 980.0 {
            set(Label::LowPressureEnvironment);
        }

        // overall status
        if spo2 < 88.0 || body_temp >= 40.0 {
            set(Label::Critical);
        } else if body_temp >= 38.5 || spo2 < 90.0 {
            set(Label::Warning);
        } else if any_condition {
            set(Label::SlightAbnormality);
        } else {
            set(Label::Normal);
            set(Label::Healthy);
        }

        Ok(RawPrediction::Vector(bits.to_vec()))
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::{normalize_prediction, Scaler};

    fn features(values: &[(SensorMetric, f64)]) -> [f64; FEATURE_COUNT] {
        // resting baseline, then overrides
        let mut physical = [0.0; FEATURE_COUNT];
        for (metric, value) in [
            (SensorMetric::BodyTemp, 36.7),
            (SensorMetric::AmbientTemp, 23.0),
            (SensorMetric::PressureHpa, 1012.0),
            (SensorMetric::HumidityPct, 45.0),
            (SensorMetric::AccelZ, 0.98),
            (SensorMetric::HeartRateBpm, 68.0),
            (SensorMetric::Spo2Pct, 98.0),
        ] {
            physical[metric.index()] = value;
        }
        for (metric, value) in values {
            physical[metric.index()] = *value;
        }
        physical
    }

    fn active_labels(physical: [f64; FEATURE_COUNT]) -> Vec<Label> {
        let scaler = StandardScaler::identity();
        let predictor = RuleBasedPredictor::new(scaler.clone());
        let raw = predictor.predict(&scaler.transform(&physical)).unwrap();
        let bits = normalize_prediction(raw);
        Label::ALL
            .iter()
            .zip(bits.iter())
            .filter(|(_, b)| **b == 1)
            .map(|(l, _)| *l)
            .collect()
    }

    #[test]
    fn resting_baseline_is_healthy() {
        let labels = active_labels(features(&[]));
        assert!(labels.contains(&Label::Sedentary));
        assert!(labels.contains(&Label::Normal));
        assert!(labels.contains(&Label::Healthy));
        assert!(!labels.iter().any(|l| {
            matches!(l, Label::Critical | Label::Warning | Label::SlightAbnormality)
        }));
    }

    #[test]
    fn fever_and_low_oxygen_escalate() {
        let labels = active_labels(features(&[
            (SensorMetric::BodyTemp, 39.0),
            (SensorMetric::Spo2Pct, 89.0),
        ]));
        assert!(labels.contains(&Label::PossibleFever));
        assert!(labels.contains(&Label::LowOxygenState));
        assert!(labels.contains(&Label::Warning));
        assert!(!labels.contains(&Label::Normal));
    }

    #[test]
    fn dangerous_oxygen_is_critical() {
        let labels = active_labels(features(&[(SensorMetric::Spo2Pct, 85.0)]));
        assert!(labels.contains(&Label::Critical));
    }

    #[test]
    fn high_heart_rate_is_running() {
        let labels = active_labels(features(&[(SensorMetric::HeartRateBpm, 155.0)]));
        assert!(labels.contains(&Label::Running));
    }

    #[test]
    fn hot_humid_environment_detected() {
        let labels = active_labels(features(&[
            (SensorMetric::AmbientTemp, 34.0),
            (SensorMetric::HumidityPct, 75.0),
        ]));
        assert!(labels.contains(&Label::HotEnvironment));
        assert!(labels.contains(&Label::HumidEnvironment));
    }

    #[test]
    fn deterministic_under_scaling() {
        let scaler = StandardScaler::new([1.0; FEATURE_COUNT], [3.0; FEATURE_COUNT]);
        let predictor = RuleBasedPredictor::new(scaler.clone());
        let physical = features(&[(SensorMetric::HeartRateBpm, 120.0)]);
        let scaled = scaler.transform(&physical);
        let a = normalize_prediction(predictor.predict(&scaled).unwrap());
        let b = normalize_prediction(predictor.predict(&scaled).unwrap());
        assert_eq!(a, b);
        assert_eq!(a[Label::HighActivity.index()], 1);
    }
}
