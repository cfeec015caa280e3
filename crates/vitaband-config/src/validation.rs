// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Semantic validation of configuration values.

use crate::{ConfigError, ConfigResult, VitabandConfig};

/// Check a loaded configuration for values that cannot work at runtime.
pub fn validate_config(config: &VitabandConfig) -> ConfigResult<()> {
    if !config.monitor.poll_interval_secs.is_finite() || config.monitor.poll_interval_secs <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "monitor.poll_interval_secs must be a positive number, got {}",
            config.monitor.poll_interval_secs
        )));
    }

    match config.monitor.recommendation_mode.as_str() {
        "short" | "detailed" => {}
        other => {
            return Err(ConfigError::Validation(format!(
                "monitor.recommendation_mode must be \"short\" or \"detailed\", got \"{other}\""
            )))
        }
    }

    if config.sensors.sources.is_empty() {
        return Err(ConfigError::Validation(
            "sensors.sources must list at least one source".to_string(),
        ));
    }

    let mut seen = Vec::new();
    for source in &config.sensors.sources {
        if source.name.is_empty() {
            return Err(ConfigError::Validation(
                "sensor source with empty name".to_string(),
            ));
        }
        if source.command.is_empty() {
            return Err(ConfigError::Validation(format!(
                "sensor source '{}' has an empty command",
                source.name
            )));
        }
        if seen.contains(&source.name) {
            return Err(ConfigError::Validation(format!(
                "duplicate sensor source name '{}'",
                source.name
            )));
        }
        seen.push(source.name.clone());
    }

    if config.sensors.queue_wait_ms == 0 {
        return Err(ConfigError::Validation(
            "sensors.queue_wait_ms must be > 0 (the aggregator needs a bounded wait)".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SensorSourceConfig;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&VitabandConfig::default()).is_ok());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut config = VitabandConfig::default();
        config.monitor.poll_interval_secs = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn bad_recommendation_mode_is_rejected() {
        let mut config = VitabandConfig::default();
        config.monitor.recommendation_mode = "verbose".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn duplicate_source_names_are_rejected() {
        let mut config = VitabandConfig::default();
        config.sensors.sources = vec![
            SensorSourceConfig {
                name: "bme280".to_string(),
                command: "a".to_string(),
                args: vec![],
            },
            SensorSourceConfig {
                name: "bme280".to_string(),
                command: "b".to_string(),
                args: vec![],
            },
        ];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_source_list_is_rejected() {
        let mut config = VitabandConfig::default();
        config.sensors.sources.clear();
        assert!(validate_config(&config).is_err());
    }
}
