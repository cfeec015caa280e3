// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Fixed-shape feature vector.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::metrics::{SensorMetric, FEATURE_COUNT};

/// Ordered, always-complete mapping of the 12 schema metrics to values.
///
/// A `FeatureVector` never has gaps: construction fills every slot with
/// the metric's static default, and `observed` records which slots were
/// later overwritten by a real reading. Downstream consumers use the
/// observed flags to tell defaults apart from live data.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
    observed: [bool; FEATURE_COUNT],
}

impl FeatureVector {
    /// A vector holding only the static defaults, nothing observed.
    pub fn defaults() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, metric) in values.iter_mut().zip(SensorMetric::ALL.iter()) {
            *slot = metric.default_value();
        }
        Self {
            values,
            observed: [false; FEATURE_COUNT],
        }
    }

    /// Value for one metric.
    pub fn get(&self, metric: SensorMetric) -> f64 {
        self.values[metric.index()]
    }

    /// Overwrite one metric with an observed value. Non-finite values are
    /// ignored so a corrupt reading can never poison the vector.
    pub fn set(&mut self, metric: SensorMetric, value: f64) {
        if !value.is_finite() {
            return;
        }
        let idx = metric.index();
        self.values[idx] = value;
        self.observed[idx] = true;
    }

    /// Whether this metric carries an observed value rather than a default.
    pub fn is_observed(&self, metric: SensorMetric) -> bool {
        self.observed[metric.index()]
    }

    /// Values in model feature order.
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Iterate (metric, value) pairs in model feature order.
    pub fn iter(&self) -> impl Iterator<Item = (SensorMetric, f64)> + '_ {
        SensorMetric::ALL
            .iter()
            .zip(self.values.iter())
            .map(|(m, v)| (*m, *v))
    }

    /// Per-metric availability map (true = observed, false = default).
    pub fn availability(&self) -> impl Iterator<Item = (SensorMetric, bool)> + '_ {
        SensorMetric::ALL
            .iter()
            .zip(self.observed.iter())
            .map(|(m, o)| (*m, *o))
    }

    /// Count of metrics backed by observed readings.
    pub fn observed_count(&self) -> usize {
        self.observed.iter().filter(|o| **o).count()
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::defaults()
    }
}

// Serialized as a name -> value map in feature order, matching the JSON
// shape the publish sink and downstream dashboards consume.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (metric, value) in self.iter() {
            map.serialize_entry(metric.name(), &value)?;
        }
        map.end()
    }
}
