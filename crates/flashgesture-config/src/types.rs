// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `flashgesture.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FlashGestureConfig {
    pub detection: DetectionParameters,
    pub actuator: ActuatorConfig,
    pub frame_source: FrameSourceConfig,
    pub logging: LoggingConfig,
}

/// Bright-region detection and flash debouncing parameters.
///
/// Immutable for the lifetime of a detection session. Construct components
/// through their `new` functions, which validate these values and fail with
/// [`crate::ConfigError`] when they are out of range.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionParameters {
    /// Minimum HSV value (0-255) for a pixel to count as bright
    pub brightness_threshold: u32,
    /// Maximum HSV saturation (0-255); a flashlight beam is near-white
    pub max_saturation: u32,
    /// A rising edge within this many ms of the last torch-off is not a new flash
    pub flash_debounce_ms: u64,
    /// Minimum region area in pixels
    pub min_region_area: f64,
    /// Sliding window for counting flashes
    pub retention_window_ms: u64,
    /// Flash count that raises the dim trigger (exact match)
    pub trigger_flash_count: usize,
}

impl Default for DetectionParameters {
    fn default() -> Self {
        Self {
            brightness_threshold: 230,
            max_saturation: 25,
            flash_debounce_ms: 500,
            min_region_area: 500.0,
            retention_window_ms: 2000,
            trigger_flash_count: 2,
        }
    }
}

impl DetectionParameters {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> crate::ConfigResult<()> {
        crate::validation::validate_detection_parameters(self)
    }

    /// Brightness threshold narrowed to a pixel value. Only meaningful after [`Self::validate`].
    pub fn brightness_threshold_u8(&self) -> u8 {
        self.brightness_threshold.min(u8::MAX as u32) as u8
    }

    /// Saturation bound narrowed to a pixel value. Only meaningful after [`Self::validate`].
    pub fn max_saturation_u8(&self) -> u8 {
        self.max_saturation.min(u8::MAX as u32) as u8
    }
}

/// Serial actuator connection and actuation timing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// When false the detector runs in detect-only mode without probing ports
    pub enabled: bool,
    /// Substrings matched against port descriptions to find the actuator
    pub identifier_substrings: Vec<String>,
    pub baud_rate: u32,
    /// Time the board needs after the port opens (it resets on open)
    pub settle_delay_ms: u64,
    /// Maximum wait for a response line
    pub response_timeout_ms: u64,
    /// Delay between an acknowledged DIM and the automatic RESET
    pub reset_delay_ms: u64,
    /// RESET attempts before the light is declared stuck dimmed
    pub reset_retry_limit: u32,
    pub reset_retry_backoff_ms: u64,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            identifier_substrings: vec!["Arduino".to_string(), "CH340".to_string()],
            baud_rate: 9600,
            settle_delay_ms: 2000,
            response_timeout_ms: 1000,
            reset_delay_ms: 10_000,
            reset_retry_limit: 3,
            reset_retry_backoff_ms: 1000,
        }
    }
}

impl ActuatorConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

/// Frame acquisition and tick loop settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrameSourceConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Period of the detection tick loop
    pub tick_interval_ms: u64,
    /// Directory of still images replayed as frames
    pub frames_dir: Option<PathBuf>,
    pub loop_playback: bool,
}

impl Default for FrameSourceConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
            tick_interval_ms: 10,
            frames_dir: None,
            loop_playback: true,
        }
    }
}

impl FrameSourceConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for crates without a debug flag (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
