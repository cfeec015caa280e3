// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! # VitaBand Data Structures
//!
//! Closed data model shared by every stage of the monitoring pipeline:
//! the 12-metric feature schema, the 24-label classification taxonomy,
//! raw sensor readings, prediction results and recommendations.
//!
//! Ordering is load-bearing in two places and both live here:
//! - [`SensorMetric::ALL`] must match the feature order the model was
//!   trained and serialized with.
//! - [`Label::ALL`] must match the label column order of the training set.
//!
//! Neither order may be changed without retraining the model.

pub mod error;
pub mod features;
pub mod labels;
pub mod metrics;
pub mod prediction;
pub mod reading;
pub mod recommendation;

pub use error::VitabandDataError;
pub use features::FeatureVector;
pub use labels::{Label, LabelClass, LABEL_COUNT};
pub use metrics::{SensorMetric, FEATURE_COUNT};
pub use prediction::PredictionResult;
pub use reading::Reading;
pub use recommendation::{PriorityLevel, Recommendation};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
