// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! # VitaBand Observability
//!
//! Unified logging initialization: a human-readable console layer plus a
//! JSON file layer with daily rotation under a per-run folder, with
//! retention cleanup of old runs.

pub mod init;

pub use init::{cleanup_old_runs, init_logging, LoggingGuard};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
