// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! The polling monitor loop: snapshot, predict, compose, emit.
//!
//! Runs single-threaded in the supervising thread; the concurrent
//! ingestion happens behind the [`FeatureAssembler`]'s buffer. Stage
//! failure policy: prediction failures degrade the cycle to an empty
//! label set, emit failures (log row, publish) are warned and skipped,
//! and only construction can fail outright.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use ahash::AHashMap;
use tracing::{debug, info, warn};
use vitaband_structures::{Label, PredictionResult, Recommendation, SensorMetric};
use vitaband_sensors::FeatureAssembler;

use crate::composer::{Intensity, RecommendationComposer};
use crate::csv_log::CycleLog;
use crate::predictor::{run_prediction, Predictor, Scaler};
use crate::sinks::{publish_health_update, PublishSink};

/// Everything one cycle produced.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub result: PredictionResult,
    pub recommendation: Recommendation,
}

pub struct MonitorCycle {
    assembler: FeatureAssembler,
    scaler: Box<dyn Scaler>,
    predictor: Box<dyn Predictor>,
    composer: RecommendationComposer,
    intensity_hints: AHashMap<Label, Intensity>,
    publish_sink: Option<Box<dyn PublishSink>>,
    cycle_log: Option<CycleLog>,
    cycle_count: u64,
}

impl MonitorCycle {
    pub fn new(
        assembler: FeatureAssembler,
        scaler: Box<dyn Scaler>,
        predictor: Box<dyn Predictor>,
        composer: RecommendationComposer,
    ) -> Self {
        Self {
            assembler,
            scaler,
            predictor,
            composer,
            intensity_hints: AHashMap::new(),
            publish_sink: None,
            cycle_log: None,
            cycle_count: 0,
        }
    }

    pub fn with_publish_sink(mut self, sink: Box<dyn PublishSink>) -> Self {
        self.publish_sink = Some(sink);
        self
    }

    pub fn with_cycle_log(mut self, log: CycleLog) -> Self {
        self.cycle_log = Some(log);
        self
    }

    pub fn with_intensity_hints(mut self, hints: AHashMap<Label, Intensity>) -> Self {
        self.intensity_hints = hints;
        self
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Run exactly one cycle: assemble, predict, compose, emit.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let snapshot = self.assembler.assemble();
        let result = run_prediction(self.predictor.as_ref(), self.scaler.as_ref(), snapshot);
        let recommendation =
            self.composer
                .compose(&result.active_labels, &result.snapshot, &self.intensity_hints);

        self.display(&result, &recommendation);

        if let Some(sink) = &self.publish_sink {
            publish_health_update(sink.as_ref(), &result, &recommendation);
        }
        if let Some(log) = &mut self.cycle_log {
            if let Err(err) = log.append(&result, &recommendation) {
                warn!("[MONITOR] Failed to write log row: {err}");
            }
        }

        self.cycle_count += 1;
        CycleOutcome {
            result,
            recommendation,
        }
    }

    /// Run cycles until the stop flag flips or `max_cycles` is reached.
    ///
    /// The inter-cycle sleep is sliced so shutdown is observed within
    /// roughly 100 ms rather than a full poll interval.
    pub fn run_loop(
        &mut self,
        stop_flag: &AtomicBool,
        poll_interval: Duration,
        max_cycles: Option<u64>,
    ) {
        info!(
            "[MONITOR] Starting continuous monitoring (interval = {:.1}s)",
            poll_interval.as_secs_f64()
        );
        while !stop_flag.load(Ordering::Acquire) {
            self.run_cycle();
            if let Some(max) = max_cycles {
                if self.cycle_count >= max {
                    info!("[MONITOR] Reached {max} cycle(s), stopping");
                    break;
                }
            }
            sleep_with_stop(stop_flag, poll_interval);
        }
        info!("[MONITOR] Monitoring loop stopped after {} cycle(s)", self.cycle_count);
    }

    fn display(&self, result: &PredictionResult, recommendation: &Recommendation) {
        let s = &result.snapshot;
        info!("[MONITOR] ===== MONITORING UPDATE - {} =====", result.timestamp);
        info!(
            "[MONITOR] Body {:.1}°C | Ambient {:.1}°C | {:.1} hPa | {:.1}% RH",
            s.get(SensorMetric::BodyTemp),
            s.get(SensorMetric::AmbientTemp),
            s.get(SensorMetric::PressureHpa),
            s.get(SensorMetric::HumidityPct),
        );
        info!(
            "[MONITOR] Accel X:{:.2}g Y:{:.2}g Z:{:.2}g | Gyro X:{:.1}°/s Y:{:.1}°/s Z:{:.1}°/s",
            s.get(SensorMetric::AccelX),
            s.get(SensorMetric::AccelY),
            s.get(SensorMetric::AccelZ),
            s.get(SensorMetric::GyroX),
            s.get(SensorMetric::GyroY),
            s.get(SensorMetric::GyroZ),
        );
        info!(
            "[MONITOR] HR {:.0} BPM | SpO2 {:.1}% | coverage {:.0}%",
            s.get(SensorMetric::HeartRateBpm),
            s.get(SensorMetric::Spo2Pct),
            self.assembler.coverage() * 100.0,
        );
        for (metric, source, age) in self.assembler.sensor_status() {
            debug!(
                "[MONITOR] {} fed by '{}' {}s ago",
                metric.name(),
                source,
                age.num_seconds(),
            );
        }
        if result.active_labels.is_empty() {
            info!("[MONITOR] Detected states: (none)");
        } else {
            info!("[MONITOR] Detected states: {}", result.joined_label_names());
        }
        info!(
            "[MONITOR] Recommendation [{}]: {}",
            recommendation.priority.as_str().to_uppercase(),
            recommendation.full_message.replace('\n', " / "),
        );
    }
}

fn sleep_with_stop(stop_flag: &AtomicBool, total: Duration) {
    const SLICE: Duration = Duration::from_millis(100);
    let mut remaining = total;
    while !remaining.is_zero() && !stop_flag.load(Ordering::Acquire) {
        let step = remaining.min(SLICE);
        std::thread::sleep(step);
        remaining -= step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::OutputMode;
    use crate::predictor::{RawPrediction, StandardScaler};
    use crate::EngineError;
    use vitaband_sensors::ReadingBuffer;
    use vitaband_structures::{PriorityLevel, Reading, FEATURE_COUNT};

    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn predict(&self, _: &[f64; FEATURE_COUNT]) -> Result<RawPrediction, EngineError> {
            Err(EngineError::Prediction("model runtime gone".to_string()))
        }
    }

    struct FixedPredictor(Vec<f64>);

    impl Predictor for FixedPredictor {
        fn predict(&self, _: &[f64; FEATURE_COUNT]) -> Result<RawPrediction, EngineError> {
            Ok(RawPrediction::Vector(self.0.clone()))
        }
    }

    fn cycle_with(predictor: Box<dyn Predictor>) -> MonitorCycle {
        MonitorCycle::new(
            FeatureAssembler::new(ReadingBuffer::new()),
            Box::new(StandardScaler::identity()),
            predictor,
            RecommendationComposer::new(OutputMode::Short),
        )
    }

    #[test]
    fn predictor_failure_still_yields_recommendation() {
        let mut cycle = cycle_with(Box::new(FailingPredictor));
        let outcome = cycle.run_cycle();
        assert!(outcome.result.active_labels.is_empty());
        assert_eq!(outcome.recommendation.priority, PriorityLevel::Normal);
        assert!(outcome.recommendation.summary.ends_with("everything looks normal."));
    }

    #[test]
    fn active_bits_drive_the_recommendation() {
        let mut bits = vec![0.0; 24];
        bits[Label::LowOxygenState.index()] = 1.0;
        let mut cycle = cycle_with(Box::new(FixedPredictor(bits)));
        let outcome = cycle.run_cycle();
        assert_eq!(outcome.result.active_labels, vec![Label::LowOxygenState]);
        assert_eq!(outcome.recommendation.priority, PriorityLevel::Warning);
    }

    #[test]
    fn cycle_log_receives_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cycles.csv");
        let log = CycleLog::create(&path).unwrap();
        let mut cycle = cycle_with(Box::new(FixedPredictor(vec![0.0; 24]))).with_cycle_log(log);
        cycle.run_cycle();
        cycle.run_cycle();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn run_loop_honors_max_cycles() {
        let stop = AtomicBool::new(false);
        let mut cycle = cycle_with(Box::new(FixedPredictor(vec![0.0; 24])));
        cycle.run_loop(&stop, Duration::from_millis(10), Some(3));
        assert_eq!(cycle.cycle_count(), 3);
    }

    #[test]
    fn run_loop_observes_stop_flag() {
        let stop = AtomicBool::new(true);
        let mut cycle = cycle_with(Box::new(FixedPredictor(vec![0.0; 24])));
        cycle.run_loop(&stop, Duration::from_secs(60), None);
        assert_eq!(cycle.cycle_count(), 0);
    }

    #[test]
    fn snapshot_reflects_buffer_state() {
        let buffer = ReadingBuffer::new();
        buffer.store(&Reading::new(
            "max30102",
            SensorMetric::Spo2Pct,
            "91.0".to_string(),
        ));
        let mut cycle = MonitorCycle::new(
            FeatureAssembler::new(buffer),
            Box::new(StandardScaler::identity()),
            Box::new(FixedPredictor(vec![0.0; 24])),
            RecommendationComposer::new(OutputMode::Detailed),
        );
        let outcome = cycle.run_cycle();
        assert_eq!(outcome.result.snapshot.get(SensorMetric::Spo2Pct), 91.0);
        assert!(outcome.result.snapshot.is_observed(SensorMetric::Spo2Pct));
    }
}
