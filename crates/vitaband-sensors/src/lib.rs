// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! # VitaBand Sensor Ingestion
//!
//! Concurrent ingestion layer: one supervised subprocess per sensor
//! source, per-source reader threads feeding a shared queue, a single
//! aggregator draining the queue into the last-value [`ReadingBuffer`],
//! and the [`FeatureAssembler`] seam that snapshots the buffer into the
//! ordered feature vector the model expects.
//!
//! The whole layer is built to survive noisy, partially available
//! hardware: malformed lines parse to nothing, missing executables are
//! skipped with a warning, and a metric that never reports is covered by
//! its static default in every snapshot.

pub mod assembler;
pub mod reading_buffer;
pub mod stream_parser;
pub mod supervisor;

pub use assembler::FeatureAssembler;
pub use reading_buffer::ReadingBuffer;
pub use stream_parser::{parse_line, SourceKind};
pub use supervisor::{SensorSupervisor, SupervisorOptions};

use thiserror::Error;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised by the sensor supervision layer.
#[derive(Debug, Error)]
pub enum SensorError {
    /// No configured source could be launched; monitoring cannot start.
    #[error("no sensor sources could be started")]
    NoSourcesStarted,
    /// A source is configured with a kind the parser does not know.
    #[error("unknown sensor source kind: {0}")]
    UnknownSourceKind(String),
    /// Failed to spawn a supervision thread.
    #[error("failed to spawn thread '{name}': {source}")]
    ThreadSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
