// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, FlashGestureConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "flashgesture.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `FLASHGESTURE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./flashgesture.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("FLASHGESTURE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by FLASHGESTURE_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
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
        "'{}' not found in any of these locations:\n{}\n\nSet FLASHGESTURE_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Range checks are left to [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FlashGestureConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: FlashGestureConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Like [`load_config`], but a missing file (when no explicit path was
/// given) falls back to the built-in defaults. Overrides still apply.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FlashGestureConfig> {
    match load_config(config_path, cli_args) {
        Err(ConfigError::FileNotFound(_)) if config_path.is_none() => {
            let mut config = FlashGestureConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            Ok(config)
        }
        other => other,
    }
}

fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

fn set_parsed<T: FromStr>(target: &mut T, value: &str) {
    if let Ok(parsed) = value.parse::<T>() {
        *target = parsed;
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `FLASHGESTURE_BRIGHTNESS_THRESHOLD` -> `detection.brightness_threshold`
/// - `FLASHGESTURE_FLASH_DEBOUNCE_MS` -> `detection.flash_debounce_ms`
/// - `FLASHGESTURE_MIN_REGION_AREA` -> `detection.min_region_area`
/// - `FLASHGESTURE_ACTUATOR_ENABLED` -> `actuator.enabled`
/// - `FLASHGESTURE_BAUD_RATE` -> `actuator.baud_rate`
/// - `FLASHGESTURE_RESET_DELAY_MS` -> `actuator.reset_delay_ms`
/// - `FLASHGESTURE_FRAMES_DIR` -> `frame_source.frames_dir`
/// - `FLASHGESTURE_TICK_INTERVAL_MS` -> `frame_source.tick_interval_ms`
/// - `FLASHGESTURE_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut FlashGestureConfig) {
    if let Ok(value) = env::var("FLASHGESTURE_BRIGHTNESS_THRESHOLD") {
        set_parsed(&mut config.detection.brightness_threshold, &value);
    }
    if let Ok(value) = env::var("FLASHGESTURE_FLASH_DEBOUNCE_MS") {
        set_parsed(&mut config.detection.flash_debounce_ms, &value);
    }
    if let Ok(value) = env::var("FLASHGESTURE_MIN_REGION_AREA") {
        set_parsed(&mut config.detection.min_region_area, &value);
    }

    if let Ok(value) = env::var("FLASHGESTURE_ACTUATOR_ENABLED") {
        config.actuator.enabled = parse_bool(&value);
    }
    if let Ok(value) = env::var("FLASHGESTURE_BAUD_RATE") {
        set_parsed(&mut config.actuator.baud_rate, &value);
    }
    if let Ok(value) = env::var("FLASHGESTURE_RESET_DELAY_MS") {
        set_parsed(&mut config.actuator.reset_delay_ms, &value);
    }

    if let Ok(value) = env::var("FLASHGESTURE_FRAMES_DIR") {
        config.frame_source.frames_dir = Some(PathBuf::from(value));
    }
    if let Ok(value) = env::var("FLASHGESTURE_TICK_INTERVAL_MS") {
        set_parsed(&mut config.frame_source.tick_interval_ms, &value);
    }

    if let Ok(value) = env::var("FLASHGESTURE_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"brightness_threshold": "200", "frames_dir": "./frames"}`)
pub fn apply_cli_overrides(config: &mut FlashGestureConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("brightness_threshold") {
        set_parsed(&mut config.detection.brightness_threshold, value);
    }
    if let Some(value) = cli_args.get("flash_debounce_ms") {
        set_parsed(&mut config.detection.flash_debounce_ms, value);
    }
    if let Some(value) = cli_args.get("min_region_area") {
        set_parsed(&mut config.detection.min_region_area, value);
    }

    if let Some(value) = cli_args.get("actuator_enabled") {
        config.actuator.enabled = parse_bool(value);
    }
    if let Some(value) = cli_args.get("reset_delay_ms") {
        set_parsed(&mut config.actuator.reset_delay_ms, value);
    }

    if let Some(value) = cli_args.get("frames_dir") {
        config.frame_source.frames_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = cli_args.get("loop_playback") {
        config.frame_source.loop_playback = parse_bool(value);
    }
    if let Some(value) = cli_args.get("tick_interval_ms") {
        set_parsed(&mut config.frame_source.tick_interval_ms, value);
    }

    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}
