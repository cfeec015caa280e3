// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Sensor metric schema.
//!
//! Every scalar quantity the pipeline knows about is one variant of
//! [`SensorMetric`]. The variant order in [`SensorMetric::ALL`] is the
//! feature order the model expects; nothing else in the system is allowed
//! to define its own ordering.

use serde::{Deserialize, Serialize};

use crate::VitabandDataError;

/// Number of metrics in the feature schema.
pub const FEATURE_COUNT: usize = 12;

/// One named scalar sensor quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorMetric {
    BodyTemp,
    AmbientTemp,
    PressureHpa,
    HumidityPct,
    AccelX,
    AccelY,
    AccelZ,
    GyroX,
    GyroY,
    GyroZ,
    HeartRateBpm,
    Spo2Pct,
}

impl SensorMetric {
    /// All metrics in model feature order. This order matches the columns
    /// the scaler and model were fitted with and must never be reordered.
    pub const ALL: [SensorMetric; FEATURE_COUNT] = [
        SensorMetric::BodyTemp,
        SensorMetric::AmbientTemp,
        SensorMetric::PressureHpa,
        SensorMetric::HumidityPct,
        SensorMetric::AccelX,
        SensorMetric::AccelY,
        SensorMetric::AccelZ,
        SensorMetric::GyroX,
        SensorMetric::GyroY,
        SensorMetric::GyroZ,
        SensorMetric::HeartRateBpm,
        SensorMetric::Spo2Pct,
    ];

    /// Canonical column name.
    pub fn name(&self) -> &'static str {
        match self {
            SensorMetric::BodyTemp => "body_temp",
            SensorMetric::AmbientTemp => "ambient_temp",
            SensorMetric::PressureHpa => "pressure_hpa",
            SensorMetric::HumidityPct => "humidity_pct",
            SensorMetric::AccelX => "accel_x",
            SensorMetric::AccelY => "accel_y",
            SensorMetric::AccelZ => "accel_z",
            SensorMetric::GyroX => "gyro_x",
            SensorMetric::GyroY => "gyro_y",
            SensorMetric::GyroZ => "gyro_z",
            SensorMetric::HeartRateBpm => "heart_rate_bpm",
            SensorMetric::Spo2Pct => "spo2_pct",
        }
    }

    /// Position of this metric in the feature vector.
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|m| m == self)
            .unwrap_or(0)
    }

    /// Static default substituted when a metric has never been observed.
    ///
    /// These constants are the feature means of the training set, so that
    /// a never-reporting sensor pulls predictions toward the distribution
    /// center instead of toward zero.
    pub fn default_value(&self) -> f64 {
        match self {
            SensorMetric::BodyTemp => 38.18543053481313,
            SensorMetric::AmbientTemp => 40.65328021937469,
            SensorMetric::PressureHpa => 1118.0779043417701,
            SensorMetric::HumidityPct => 2.2290509612701151,
            SensorMetric::AccelX => -2.9304472197953389,
            SensorMetric::AccelY => 1.52609944889852,
            SensorMetric::AccelZ => -3.45767613961922,
            SensorMetric::GyroX => -192.49125756855392,
            SensorMetric::GyroY => 228.95306166720195,
            SensorMetric::GyroZ => 104.31422945069176,
            SensorMetric::HeartRateBpm => 100.85761985373327,
            SensorMetric::Spo2Pct => 50.4721417330743,
        }
    }

    /// Look up a metric by its canonical column name.
    pub fn from_name(name: &str) -> Result<SensorMetric, VitabandDataError> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == name)
            .ok_or_else(|| VitabandDataError::UnknownName(name.to_string()))
    }
}

impl std::fmt::Display for SensorMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_order_is_stable() {
        let names: Vec<&str> = SensorMetric::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "body_temp",
                "ambient_temp",
                "pressure_hpa",
                "humidity_pct",
                "accel_x",
                "accel_y",
                "accel_z",
                "gyro_x",
                "gyro_y",
                "gyro_z",
                "heart_rate_bpm",
                "spo2_pct",
            ]
        );
    }

    #[test]
    fn index_round_trips() {
        for (i, metric) in SensorMetric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
            assert_eq!(SensorMetric::from_name(metric.name()).unwrap(), *metric);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(SensorMetric::from_name("blood_glucose").is_err());
    }

    #[test]
    fn defaults_are_finite() {
        for metric in SensorMetric::ALL {
            assert!(metric.default_value().is_finite());
        }
    }
}
