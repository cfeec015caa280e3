// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Append-only CSV record of every monitoring cycle.
//!
//! One row per cycle: timestamp, the 12 feature values, the joined
//! active-label names, the recommendation summary and the priority.
//! The file is flushed after each row so a crash loses at most the
//! cycle in flight. Open failure is fatal at init; a failed row write
//! is only a warning at the call site.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use vitaband_structures::{PredictionResult, Recommendation, SensorMetric};

use crate::EngineError;

pub struct CycleLog {
    writer: BufWriter<File>,
    path: PathBuf,
    rows_written: u64,
}

impl CycleLog {
    /// Create the log file and write the header row.
    pub fn create(path: &Path) -> Result<CycleLog, EngineError> {
        let open_err = |source| EngineError::LogOpen {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(open_err)?;
            }
        }
        let file = File::create(path).map_err(open_err)?;
        let mut log = CycleLog {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            rows_written: 0,
        };
        log.write_header()?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    fn write_header(&mut self) -> Result<(), EngineError> {
        let mut fields = vec!["timestamp"];
        for metric in &SensorMetric::ALL {
            fields.push(metric.name());
        }
        fields.extend(["active_labels", "recommendation", "priority"]);
        writeln!(self.writer, "{}", fields.join(","))?;
        self.writer.flush()?;
        Ok(())
    }

    /// Append one cycle's row and flush.
    pub fn append(
        &mut self,
        result: &PredictionResult,
        recommendation: &Recommendation,
    ) -> Result<(), EngineError> {
        let mut fields: Vec<String> = Vec::with_capacity(16);
        fields.push(result.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true));
        for value in result.snapshot.as_array() {
            fields.push(value.to_string());
        }
        fields.push(quote(&result.joined_label_names()));
        fields.push(quote(&recommendation.summary));
        fields.push(recommendation.priority.as_str().to_string());
        writeln!(self.writer, "{}", fields.join(","))?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}

/// CSV-quote a text field: wrap in double quotes, double any inner ones.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitaband_structures::{FeatureVector, Label, PriorityLevel, LABEL_COUNT};

    fn sample_row_inputs() -> (PredictionResult, Recommendation) {
        let mut bits = [0u8; LABEL_COUNT];
        bits[Label::Walking.index()] = 1;
        bits[Label::HotEnvironment.index()] = 1;
        let result = PredictionResult::from_binary_vector(bits, FeatureVector::defaults());
        let recommendation = Recommendation {
            summary: "From your readings, \"all\" looks fine".to_string(),
            action_text: "Keep going".to_string(),
            priority: PriorityLevel::Normal,
            full_message: "...".to_string(),
        };
        (result, recommendation)
    }

    #[test]
    fn header_matches_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        CycleLog::create(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert!(header.starts_with("timestamp,body_temp,ambient_temp,"));
        assert!(header.ends_with("heart_rate_bpm,spo2_pct,active_labels,recommendation,priority"));
        assert_eq!(header.split(',').count(), 16);
    }

    #[test]
    fn rows_are_quoted_and_flushed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut log = CycleLog::create(&path).unwrap();
        let (result, recommendation) = sample_row_inputs();
        log.append(&result, &recommendation).unwrap();
        assert_eq!(log.rows_written(), 1);

        // flushed per row: readable while the log is still open
        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.contains("\"Walking, Hot environment\""));
        assert!(row.contains("\"From your readings, \"\"all\"\" looks fine\""));
        assert!(row.ends_with(",normal"));
    }

    #[test]
    fn nested_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("runs").join("log.csv");
        assert!(CycleLog::create(&path).is_ok());
        assert!(path.is_file());
    }

    #[test]
    fn unwritable_path_is_fatal() {
        let result = CycleLog::create(Path::new("/proc/does-not-exist/log.csv"));
        assert!(matches!(result, Err(EngineError::LogOpen { .. })));
    }
}
