// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metrics::SensorMetric;

/// One timestamped observation of a single metric from a single source.
///
/// Readings are ephemeral: a reader thread produces them from one line of
/// subprocess output and the aggregator consumes them exactly once. The
/// value stays a string until the aggregator parses it, so the parser can
/// remain total over arbitrary sensor noise.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub metric: SensorMetric,
    pub value: String,
}

impl Reading {
    pub fn new(source: &str, metric: SensorMetric, value: String) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.to_string(),
            metric,
            value,
        }
    }

    /// Parse the raw value; `None` for anything that is not a finite float.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_value_parses_floats() {
        let r = Reading::new("ds18b20", SensorMetric::BodyTemp, "36.9".to_string());
        assert_eq!(r.numeric_value(), Some(36.9));
    }

    #[test]
    fn numeric_value_rejects_noise() {
        for raw in ["", "abc", "NaN", "inf", "36.9.1"] {
            let r = Reading::new("ds18b20", SensorMetric::BodyTemp, raw.to_string());
            assert_eq!(r.numeric_value(), None, "raw = {raw:?}");
        }
    }
}
