// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use crate::clock::NowMs;

/// Status shown to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureStatus {
    Initializing,
    Detecting,
    FlashDetected { count: usize },
    LightDimmed,
    LightReset,
    CountReset,
    /// Running without an actuator; gestures are detected but not acted on
    ActuatorUnavailable,
    /// Every RESET attempt after a DIM failed
    LightStuckDimmed,
    Error(String),
}

impl Display for GestureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureStatus::Initializing => write!(f, "Status: Initializing..."),
            GestureStatus::Detecting => write!(f, "Status: Detecting"),
            GestureStatus::FlashDetected { count } => {
                write!(f, "Status: Flash detected! ({} in window)", count)
            }
            GestureStatus::LightDimmed => write!(f, "Status: Light dimmed successfully!"),
            GestureStatus::LightReset => write!(f, "Status: Light reset successfully!"),
            GestureStatus::CountReset => write!(f, "Status: Count reset"),
            GestureStatus::ActuatorUnavailable => write!(f, "Status: Actuator unavailable"),
            GestureStatus::LightStuckDimmed => write!(f, "Error: Light stuck dimmed"),
            GestureStatus::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Numbers overlaid on frames in debug mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugInfo {
    pub flash_count: usize,
    pub torch_on: bool,
    /// `None` before the torch has ever gone dark
    pub ms_since_last_off: Option<NowMs>,
}

impl Display for DebugInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flash Count: {} | Torch On: {} | Since Last Off: ",
            self.flash_count, self.torch_on
        )?;
        match self.ms_since_last_off {
            Some(ms) => write!(f, "{}ms", ms),
            None => write!(f, "n/a"),
        }
    }
}
