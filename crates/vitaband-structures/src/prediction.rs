// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::features::FeatureVector;
use crate::labels::{Label, LABEL_COUNT};

/// Outcome of one classification cycle. Immutable after creation.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub timestamp: DateTime<Utc>,
    /// Labels whose binary-vector bit is 1, in taxonomy order.
    pub active_labels: Vec<Label>,
    /// Exactly one bit per taxonomy label.
    pub binary_vector: [u8; LABEL_COUNT],
    /// The (unscaled) feature snapshot the prediction was made from.
    pub snapshot: FeatureVector,
}

impl PredictionResult {
    /// Build a result from a normalized binary vector.
    pub fn from_binary_vector(binary_vector: [u8; LABEL_COUNT], snapshot: FeatureVector) -> Self {
        let active_labels = Label::ALL
            .iter()
            .zip(binary_vector.iter())
            .filter(|(_, bit)| **bit == 1)
            .map(|(label, _)| *label)
            .collect();
        Self {
            timestamp: Utc::now(),
            active_labels,
            binary_vector,
            snapshot,
        }
    }

    /// Result carrying no active labels, used when prediction fails.
    pub fn empty(snapshot: FeatureVector) -> Self {
        Self::from_binary_vector([0; LABEL_COUNT], snapshot)
    }

    pub fn is_label_active(&self, label: Label) -> bool {
        self.binary_vector[label.index()] == 1
    }

    /// Comma-joined active label names, as written to the log sink.
    pub fn joined_label_names(&self) -> String {
        self.active_labels
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
