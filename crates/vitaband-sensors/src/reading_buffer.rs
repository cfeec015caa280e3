// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Shared latest-value store fed by the aggregator and drained by the
//! monitor cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use vitaband_structures::{FeatureVector, Reading, SensorMetric};

#[derive(Debug, Clone)]
struct Slot {
    value: f64,
    updated_at: DateTime<Utc>,
    source: String,
}

#[derive(Debug, Default)]
struct BufferInner {
    slots: [Option<Slot>; vitaband_structures::FEATURE_COUNT],
}

/// Last-write-wins buffer of the most recent value per metric.
///
/// Cheap to clone; all clones share the same inner state. Writers never
/// block readers for longer than a twelve-slot copy.
#[derive(Debug, Clone, Default)]
pub struct ReadingBuffer {
    inner: Arc<Mutex<BufferInner>>,
}

impl ReadingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reading, replacing any earlier value for the same metric.
    ///
    /// Readings whose raw value does not parse to a finite number are
    /// dropped; the previous value for that metric stays in place.
    pub fn store(&self, reading: &Reading) -> bool {
        let Some(value) = reading.numeric_value() else {
            return false;
        };
        let mut inner = self.inner.lock();
        inner.slots[reading.metric.index()] = Some(Slot {
            value,
            updated_at: reading.timestamp,
            source: reading.source.clone(),
        });
        true
    }

    /// Copy the current state into a feature vector. Metrics that have
    /// never been stored carry their training-time defaults, unobserved.
    pub fn snapshot(&self) -> FeatureVector {
        let inner = self.inner.lock();
        let mut features = FeatureVector::defaults();
        for (i, slot) in inner.slots.iter().enumerate() {
            if let Some(slot) = slot {
                features.set(SensorMetric::ALL[i], slot.value);
            }
        }
        features
    }

    /// Per-metric freshness for status reporting: `(metric, source, age)`
    /// for every metric that has been observed at least once.
    pub fn status(&self, now: DateTime<Utc>) -> Vec<(SensorMetric, String, chrono::Duration)> {
        let inner = self.inner.lock();
        inner
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.as_ref().map(|s| {
                    (SensorMetric::ALL[i], s.source.clone(), now - s.updated_at)
                })
            })
            .collect()
    }

    pub fn observed_count(&self) -> usize {
        self.inner.lock().slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(metric: SensorMetric, value: &str) -> Reading {
        Reading::new("test", metric, value.to_string())
    }

    #[test]
    fn empty_snapshot_is_all_defaults() {
        let buffer = ReadingBuffer::new();
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.observed_count(), 0);
        for metric in SensorMetric::ALL {
            assert_eq!(snapshot.get(metric), metric.default_value());
        }
    }

    #[test]
    fn last_write_wins() {
        let buffer = ReadingBuffer::new();
        assert!(buffer.store(&reading(SensorMetric::BodyTemp, "36.5")));
        assert!(buffer.store(&reading(SensorMetric::BodyTemp, "37.2")));
        assert_eq!(buffer.snapshot().get(SensorMetric::BodyTemp), 37.2);
        assert_eq!(buffer.observed_count(), 1);
    }

    #[test]
    fn unparseable_value_keeps_previous() {
        let buffer = ReadingBuffer::new();
        buffer.store(&reading(SensorMetric::HeartRateBpm, "72.0"));
        assert!(!buffer.store(&reading(SensorMetric::HeartRateBpm, "NaN")));
        assert!(!buffer.store(&reading(SensorMetric::HeartRateBpm, "n/a")));
        assert_eq!(buffer.snapshot().get(SensorMetric::HeartRateBpm), 72.0);
    }

    #[test]
    fn snapshot_mixes_observed_and_defaults() {
        let buffer = ReadingBuffer::new();
        buffer.store(&reading(SensorMetric::Spo2Pct, "97.5"));
        let snapshot = buffer.snapshot();
        assert!(snapshot.is_observed(SensorMetric::Spo2Pct));
        assert_eq!(snapshot.get(SensorMetric::Spo2Pct), 97.5);
        assert!(!snapshot.is_observed(SensorMetric::BodyTemp));
        assert_eq!(
            snapshot.get(SensorMetric::BodyTemp),
            SensorMetric::BodyTemp.default_value()
        );
    }

    #[test]
    fn status_reports_source_and_age() {
        let buffer = ReadingBuffer::new();
        buffer.store(&reading(SensorMetric::HumidityPct, "44.1"));
        let status = buffer.status(Utc::now());
        assert_eq!(status.len(), 1);
        let (metric, source, age) = &status[0];
        assert_eq!(*metric, SensorMetric::HumidityPct);
        assert_eq!(source, "test");
        assert!(age.num_seconds() >= 0);
    }

    #[test]
    fn clones_share_state() {
        let buffer = ReadingBuffer::new();
        let clone = buffer.clone();
        buffer.store(&reading(SensorMetric::AccelZ, "0.98"));
        assert_eq!(clone.snapshot().get(SensorMetric::AccelZ), 0.98);
    }
}
