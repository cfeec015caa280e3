// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Stateless line parsers for each sensor source's stdout format.
//!
//! `parse_line` is total: it never blocks and never fails, it just
//! returns an empty vec for anything it does not recognize. Sensor noise,
//! partial writes and diagnostic chatter all fall through silently.
//!
//! The four formats, one per source kind:
//! - `ds18b20`  — a bare number per line (body temperature)
//! - `bme280`   — labeled lines: `Temperature: 23.41 °C`,
//!   `Pressure: 1012.33 hPa`, `Humidity: 45.20 %`
//! - `mpu6050`  — axis triads: `Accel: X=  0.01g  Y= -0.02g  Z=  0.98g`
//!   and `Gyro:  X=   1.20°/s ...`
//! - `max30102` — compact JSON records:
//!   `{"heart_rate": 72.5, "spo2": 97.1}`

use vitaband_structures::SensorMetric;

use crate::SensorError;

/// Which parse rules apply to a source's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Ds18b20,
    Bme280,
    Mpu6050,
    Max30102,
}

impl SourceKind {
    /// Resolve a configured source name to its parse rules.
    pub fn from_name(name: &str) -> Result<SourceKind, SensorError> {
        match name {
            "ds18b20" => Ok(SourceKind::Ds18b20),
            "bme280" => Ok(SourceKind::Bme280),
            "mpu6050" => Ok(SourceKind::Mpu6050),
            "max30102" => Ok(SourceKind::Max30102),
            other => Err(SensorError::UnknownSourceKind(other.to_string())),
        }
    }
}

/// Parse one stdout line into zero or more (metric, raw value) pairs.
///
/// Values stay strings here; the aggregator does the numeric parse so a
/// garbled number is dropped there rather than crashing a reader thread.
pub fn parse_line(kind: SourceKind, line: &str) -> Vec<(SensorMetric, String)> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    match kind {
        SourceKind::Ds18b20 => parse_ds18b20(line),
        SourceKind::Bme280 => parse_bme280(line),
        SourceKind::Mpu6050 => parse_mpu6050(line),
        SourceKind::Max30102 => parse_max30102(line),
    }
}

fn parse_ds18b20(line: &str) -> Vec<(SensorMetric, String)> {
    // the whole line must be one number; anything else is diagnostics
    if line.parse::<f64>().is_ok() {
        vec![(SensorMetric::BodyTemp, line.to_string())]
    } else {
        Vec::new()
    }
}

fn parse_bme280(line: &str) -> Vec<(SensorMetric, String)> {
    let labeled = |prefix: &str, metric: SensorMetric| -> Option<(SensorMetric, String)> {
        let rest = line.strip_prefix(prefix)?;
        first_number(rest).map(|n| (metric, n))
    };

    if line.starts_with("Temperature:") && line.contains("°C") {
        return labeled("Temperature:", SensorMetric::AmbientTemp)
            .into_iter()
            .collect();
    }
    if line.starts_with("Pressure:") {
        return labeled("Pressure:", SensorMetric::PressureHpa)
            .into_iter()
            .collect();
    }
    if line.starts_with("Humidity:") {
        return labeled("Humidity:", SensorMetric::HumidityPct)
            .into_iter()
            .collect();
    }
    Vec::new()
}

fn parse_mpu6050(line: &str) -> Vec<(SensorMetric, String)> {
    let (rest, metrics, unit): (&str, [SensorMetric; 3], &str) =
        if let Some(rest) = line.strip_prefix("Accel:") {
            (
                rest,
                [SensorMetric::AccelX, SensorMetric::AccelY, SensorMetric::AccelZ],
                "g",
            )
        } else if let Some(rest) = line.strip_prefix("Gyro:") {
            (
                rest,
                [SensorMetric::GyroX, SensorMetric::GyroY, SensorMetric::GyroZ],
                "°/s",
            )
        } else {
            return Vec::new();
        };

    let mut results = Vec::with_capacity(3);
    for (axis, metric) in ["X=", "Y=", "Z="].iter().zip(metrics.iter()) {
        if let Some(value) = axis_value(rest, axis, unit) {
            results.push((*metric, value));
        }
    }
    results
}

fn parse_max30102(line: &str) -> Vec<(SensorMetric, String)> {
    let Ok(record) = serde_json::from_str::<serde_json::Value>(line) else {
        return Vec::new();
    };
    let mut results = Vec::with_capacity(2);
    for (key, metric) in [
        ("heart_rate", SensorMetric::HeartRateBpm),
        ("spo2", SensorMetric::Spo2Pct),
    ] {
        // null fields mark an invalid measurement window and are skipped
        if let Some(value) = record.get(key).and_then(|v| v.as_f64()) {
            results.push((metric, value.to_string()));
        }
    }
    results
}

/// First decimal number in a string, sign included.
fn first_number(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let start = bytes.iter().enumerate().position(|(i, &b)| {
        b.is_ascii_digit()
            || ((b == b'+' || b == b'-') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    })?;
    let mut end = start + 1;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        if b.is_ascii_digit() {
            end += 1;
        } else if b == b'.' && !seen_dot {
            seen_dot = true;
            end += 1;
        } else {
            break;
        }
    }
    let candidate = &s[start..end];
    candidate.parse::<f64>().ok().map(|_| candidate.to_string())
}

/// Number following `X=` / `Y=` / `Z=` and terminated by the axis unit.
fn axis_value(s: &str, axis: &str, unit: &str) -> Option<String> {
    let pos = s.find(axis)?;
    let rest = &s[pos + axis.len()..];
    let number = first_number(rest)?;
    // the unit must follow the number for the token to count
    let after = &rest[rest.find(&number)? + number.len()..];
    if after.starts_with(unit) {
        Some(number)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ds18b20_bare_number() {
        assert_eq!(
            parse_line(SourceKind::Ds18b20, "36.9"),
            vec![(SensorMetric::BodyTemp, "36.9".to_string())]
        );
        assert_eq!(
            parse_line(SourceKind::Ds18b20, "-0.5"),
            vec![(SensorMetric::BodyTemp, "-0.5".to_string())]
        );
    }

    #[test]
    fn ds18b20_rejects_diagnostics() {
        assert!(parse_line(SourceKind::Ds18b20, "DS18B20 failed 10 consecutive reads").is_empty());
        assert!(parse_line(SourceKind::Ds18b20, "36.9 °C").is_empty());
    }

    #[test]
    fn bme280_labeled_lines() {
        assert_eq!(
            parse_line(SourceKind::Bme280, "Temperature: 23.41 °C"),
            vec![(SensorMetric::AmbientTemp, "23.41".to_string())]
        );
        assert_eq!(
            parse_line(SourceKind::Bme280, "Pressure: 1012.33 hPa"),
            vec![(SensorMetric::PressureHpa, "1012.33".to_string())]
        );
        assert_eq!(
            parse_line(SourceKind::Bme280, "Humidity: 45.20 %"),
            vec![(SensorMetric::HumidityPct, "45.20".to_string())]
        );
    }

    #[test]
    fn bme280_temperature_requires_unit() {
        // without the °C marker the line could be anything
        assert!(parse_line(SourceKind::Bme280, "Temperature: rising").is_empty());
        assert!(parse_line(SourceKind::Bme280, "Temperature: 23.41").is_empty());
    }

    #[test]
    fn mpu6050_accel_triad() {
        let parsed = parse_line(SourceKind::Mpu6050, "Accel: X=  0.01g  Y= -0.02g  Z=  0.98g");
        assert_eq!(
            parsed,
            vec![
                (SensorMetric::AccelX, "0.01".to_string()),
                (SensorMetric::AccelY, "-0.02".to_string()),
                (SensorMetric::AccelZ, "0.98".to_string()),
            ]
        );
    }

    #[test]
    fn mpu6050_gyro_triad() {
        let parsed =
            parse_line(SourceKind::Mpu6050, "Gyro:  X=   1.20°/s  Y=  -3.75°/s  Z=   0.00°/s");
        assert_eq!(
            parsed,
            vec![
                (SensorMetric::GyroX, "1.20".to_string()),
                (SensorMetric::GyroY, "-3.75".to_string()),
                (SensorMetric::GyroZ, "0.00".to_string()),
            ]
        );
    }

    #[test]
    fn mpu6050_partial_triad_yields_partial_pairs() {
        let parsed = parse_line(SourceKind::Mpu6050, "Accel: X=  0.01g  Y= -0.0");
        assert_eq!(parsed, vec![(SensorMetric::AccelX, "0.01".to_string())]);
    }

    #[test]
    fn max30102_json_record() {
        let parsed = parse_line(SourceKind::Max30102, r#"{"heart_rate": 72.5, "spo2": 97.1}"#);
        assert_eq!(
            parsed,
            vec![
                (SensorMetric::HeartRateBpm, "72.5".to_string()),
                (SensorMetric::Spo2Pct, "97.1".to_string()),
            ]
        );
    }

    #[test]
    fn max30102_null_fields_are_skipped() {
        let parsed = parse_line(SourceKind::Max30102, r#"{"heart_rate": null, "spo2": null}"#);
        assert!(parsed.is_empty());
        let parsed = parse_line(SourceKind::Max30102, r#"{"heart_rate": 68.0, "spo2": null}"#);
        assert_eq!(parsed, vec![(SensorMetric::HeartRateBpm, "68".to_string())]);
    }

    #[test]
    fn malformed_input_never_panics() {
        let garbage = [
            "",
            "   ",
            "{truncated",
            "X=Y=Z=",
            "Accel:",
            "Pressure:",
            "\u{0}\u{1}\u{2}",
            "Temperature: °C",
        ];
        for kind in [
            SourceKind::Ds18b20,
            SourceKind::Bme280,
            SourceKind::Mpu6050,
            SourceKind::Max30102,
        ] {
            for line in garbage {
                let _ = parse_line(kind, line);
            }
        }
    }

    #[test]
    fn source_kind_resolution() {
        assert_eq!(SourceKind::from_name("bme280").unwrap(), SourceKind::Bme280);
        assert!(SourceKind::from_name("thermocam").is_err());
    }
}
