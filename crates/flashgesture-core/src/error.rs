// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use flashgesture_actuator::{CommandError, ConnectError};
use flashgesture_vision::SourceError;

/// Errors reported to a [`crate::GestureObserver`]
///
/// None of these stop detection; they are notifications.
#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    /// Frame acquisition failed; the tick was skipped
    #[error("Frame source error: {0}")]
    Source(#[from] SourceError),

    /// The actuator could not be brought up at start
    #[error("Actuator connection failed: {0}")]
    Connect(#[from] ConnectError),

    #[error("Actuator command failed: {0}")]
    Command(#[from] CommandError),

    /// Every scheduled RESET attempt failed
    #[error("Light reset failed after {attempts} attempts; light may be stuck dimmed")]
    ResetEscalated { attempts: u32 },
}
