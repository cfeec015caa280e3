// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Best-effort output sinks.
//!
//! The engine builds the payloads; the transports behind [`PublishSink`]
//! and [`AnnounceSink`] live outside this crate and are injected at
//! construction. Every sink call site downgrades failure to a warning,
//! so an unreachable broker can never stall a monitoring cycle.

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::warn;
use vitaband_structures::{PredictionResult, Recommendation};

use crate::EngineError;

/// Topic for the per-cycle priority level.
pub const TOPIC_STATUS: &str = "health/status";
/// Topic for the full recommendation bundle.
pub const TOPIC_RECOMMENDATION: &str = "health/recommendation";
/// Topic for the raw sensor snapshot.
pub const TOPIC_SENSORS: &str = "health/sensors";
/// Topic for warning/critical alerts only.
pub const TOPIC_ALERTS: &str = "health/alerts";

/// Message-bus transport boundary.
pub trait PublishSink: Send {
    fn publish(&self, topic: &str, payload: &serde_json::Value) -> Result<(), EngineError>;
}

/// Service-advertisement boundary (logical name + port on the local
/// network). Optional; failure is never fatal to monitoring.
pub trait AnnounceSink: Send {
    fn announce(&self, service_name: &str, port: u16) -> Result<(), EngineError>;
    fn withdraw(&self);
}

/// Publish one cycle's outcome across all topics.
///
/// Each topic is attempted independently; a failed publish is warned
/// and the rest still go out.
pub fn publish_health_update(
    sink: &dyn PublishSink,
    result: &PredictionResult,
    recommendation: &Recommendation,
) {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    let messages = [
        (
            TOPIC_RECOMMENDATION,
            json!({
                "timestamp": timestamp,
                "message": recommendation.full_message,
                "summary": recommendation.summary,
                "advice": recommendation.action_text,
                "priority": recommendation.priority,
            }),
        ),
        (
            TOPIC_SENSORS,
            json!({
                "timestamp": timestamp,
                "sensors": result.snapshot,
            }),
        ),
        (
            TOPIC_STATUS,
            json!({
                "timestamp": timestamp,
                "priority": recommendation.priority,
            }),
        ),
    ];
    for (topic, payload) in &messages {
        if let Err(err) = sink.publish(topic, payload) {
            warn!("[PUBLISH] {topic} failed: {err}");
        }
    }

    if recommendation.priority.is_alert() {
        let labels: Vec<&str> = result.active_labels.iter().map(|l| l.name()).collect();
        let alert = json!({
            "timestamp": timestamp,
            "level": recommendation.priority,
            "message": recommendation.full_message,
            "labels": labels,
        });
        if let Err(err) = sink.publish(TOPIC_ALERTS, &alert) {
            warn!("[PUBLISH] {TOPIC_ALERTS} failed: {err}");
        }
    }
}
