// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Ensures configuration values are within valid ranges before any component
//! is built from them. All problems are collected and reported together.

use crate::{ConfigError, ConfigResult, DetectionParameters, FlashGestureConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with every problem found
pub fn validate_config(config: &FlashGestureConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_detection(&config.detection, &mut errors);
    validate_actuator(config, &mut errors);
    validate_frame_source(config, &mut errors);
    validate_logging(config, &mut errors);

    into_result(errors)
}

/// Validate only the detection parameters
///
/// Used by the extractor and tracker constructors so that an invalid
/// parameter set is rejected at construction time.
pub fn validate_detection_parameters(params: &DetectionParameters) -> ConfigResult<()> {
    let mut errors = Vec::new();
    validate_detection(params, &mut errors);
    into_result(errors)
}

fn into_result(errors: Vec<ConfigValidationError>) -> ConfigResult<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

fn invalid(errors: &mut Vec<ConfigValidationError>, field: &str, reason: &str) {
    errors.push(ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    });
}

fn validate_detection(params: &DetectionParameters, errors: &mut Vec<ConfigValidationError>) {
    if params.brightness_threshold > 255 {
        invalid(errors, "detection.brightness_threshold", "must be between 0 and 255");
    }
    if params.max_saturation > 255 {
        invalid(errors, "detection.max_saturation", "must be between 0 and 255");
    }
    if params.flash_debounce_ms == 0 {
        invalid(errors, "detection.flash_debounce_ms", "must be positive");
    }
    if !(params.min_region_area.is_finite() && params.min_region_area > 0.0) {
        invalid(errors, "detection.min_region_area", "must be a positive number");
    }
    if params.retention_window_ms == 0 {
        invalid(errors, "detection.retention_window_ms", "must be positive");
    }
    if params.trigger_flash_count == 0 {
        invalid(errors, "detection.trigger_flash_count", "must be at least 1");
    }
}

fn validate_actuator(config: &FlashGestureConfig, errors: &mut Vec<ConfigValidationError>) {
    let actuator = &config.actuator;
    if !actuator.enabled {
        return;
    }

    if actuator.identifier_substrings.iter().all(|s| s.trim().is_empty()) {
        errors.push(ConfigValidationError::MissingRequired {
            field: "actuator.identifier_substrings".to_string(),
        });
    }
    if actuator.baud_rate == 0 {
        invalid(errors, "actuator.baud_rate", "must be positive");
    }
    if actuator.response_timeout_ms == 0 {
        invalid(errors, "actuator.response_timeout_ms", "must be positive");
    }
}

fn validate_frame_source(config: &FlashGestureConfig, errors: &mut Vec<ConfigValidationError>) {
    let frames = &config.frame_source;
    if frames.width == 0 || frames.height == 0 {
        invalid(errors, "frame_source.width/height", "must be non-zero");
    }
    if frames.tick_interval_ms == 0 {
        invalid(errors, "frame_source.tick_interval_ms", "must be positive");
    }
}

fn validate_logging(config: &FlashGestureConfig, errors: &mut Vec<ConfigValidationError>) {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        invalid(
            errors,
            "logging.level",
            "must be one of trace, debug, info, warn, error",
        );
    }
}
