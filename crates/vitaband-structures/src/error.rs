// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Common error type for VitaBand data operations.
#[derive(Debug, Error)]
pub enum VitabandDataError {
    /// A metric or label name that is not part of the closed schema
    #[error("unknown name in schema: {0}")]
    UnknownName(String),
    /// Invalid parameters provided to a constructor or operation
    #[error("bad parameters: {0}")]
    BadParameters(String),
    /// Failed to serialize a structure
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
