// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support.
//!
//! Loading is layered: TOML file defaults first, then environment
//! variables for runtime overrides. A missing file is not an error; the
//! serde defaults already describe a runnable system.

use crate::{validate_config, ConfigError, ConfigResult, VitabandConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "vitaband_configuration.toml";

/// Find the VitaBand configuration file.
///
/// Search order:
/// 1. `VITABAND_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Ancestor directories (up to 5 levels)
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("VITABAND_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "config file set by VITABAND_CONFIG_PATH does not exist: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd;
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent.to_path_buf();
                }
                None => break,
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ConfigError::FileNotFound(format!(
        "'{CONFIG_FILE_NAME}' not found in any of:\n{search_list}\n\nSet VITABAND_CONFIG_PATH to use a custom location."
    )))
}

/// Load configuration.
///
/// With `config_path = None` the file is discovered via [`find_config_file`];
/// if discovery fails the built-in defaults are used. An explicitly given
/// path must exist and parse.
pub fn load_config(config_path: Option<&Path>) -> ConfigResult<VitabandConfig> {
    let mut config = match config_path {
        Some(path) => parse_file(path)?,
        None => match find_config_file() {
            Ok(path) => parse_file(&path)?,
            Err(ConfigError::FileNotFound(_)) => VitabandConfig::default(),
            Err(e) => return Err(e),
        },
    };

    apply_environment_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

fn parse_file(path: &Path) -> ConfigResult<VitabandConfig> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Apply `VITABAND_*` environment variable overrides on top of the file.
pub fn apply_environment_overrides(config: &mut VitabandConfig) {
    if let Ok(v) = env::var("VITABAND_POLL_INTERVAL_SECS") {
        if let Ok(secs) = v.parse::<f64>() {
            config.monitor.poll_interval_secs = secs;
        }
    }
    if let Ok(v) = env::var("VITABAND_MQTT_BROKER_HOST") {
        config.mqtt.broker_host = v;
    }
    if let Ok(v) = env::var("VITABAND_MQTT_BROKER_PORT") {
        if let Ok(port) = v.parse::<u16>() {
            config.mqtt.broker_port = port;
        }
    }
    if let Ok(v) = env::var("VITABAND_MQTT_ENABLED") {
        config.mqtt.enabled = v.eq_ignore_ascii_case("true") || v == "1";
    }
    if let Ok(v) = env::var("VITABAND_MDNS_ENABLED") {
        config.mdns.enabled = v.eq_ignore_ascii_case("true") || v == "1";
    }
    if let Ok(v) = env::var("VITABAND_LOG_FILTER") {
        config.logging.filter = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_load_without_a_file() {
        let config = VitabandConfig::default();
        assert_eq!(config.monitor.poll_interval_secs, 5.0);
        assert_eq!(config.sensors.sources.len(), 4);
        assert!(!config.mqtt.enabled);
    }

    #[test]
    fn partial_file_is_merged_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "[monitor]\npoll_interval_secs = 1.5\n\n[mqtt]\nenabled = true\nbroker_host = \"broker.local\"\n"
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.monitor.poll_interval_secs, 1.5);
        assert!(config.mqtt.enabled);
        assert_eq!(config.mqtt.broker_host, "broker.local");
        // untouched section keeps its defaults
        assert_eq!(config.mdns.service_name, "VitaBand");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config(Some(Path::new("/does/not/exist.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn sensor_sources_parse_with_default_args() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "[[sensors.sources]]\nname = \"ds18b20\"\ncommand = \"/usr/local/bin/ds18b20\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.sensors.sources.len(), 1);
        assert_eq!(config.sensors.sources[0].name, "ds18b20");
        assert!(config.sensors.sources[0].args.is_empty());
    }
}
