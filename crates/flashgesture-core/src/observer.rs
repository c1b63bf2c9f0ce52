// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Notification hooks for the controller's owner.

use flashgesture_vision::ImageFrame;
use tracing::{error, info};

use crate::error::GestureError;
use crate::status::{DebugInfo, GestureStatus};
use crate::tracker::FlashEvent;

/// Receives controller notifications. Every method defaults to a no-op.
pub trait GestureObserver {
    fn on_flash_detected(&mut self, _event: &FlashEvent, _flash_count: usize) {}

    fn on_status_changed(&mut self, _status: &GestureStatus) {}

    fn on_error(&mut self, _error: &GestureError) {}

    /// Annotated frame, only while debug annotations are enabled
    fn on_debug_frame(&mut self, _frame: &ImageFrame, _info: &DebugInfo) {}
}

impl<O: GestureObserver + ?Sized> GestureObserver for Box<O> {
    fn on_flash_detected(&mut self, event: &FlashEvent, flash_count: usize) {
        (**self).on_flash_detected(event, flash_count)
    }

    fn on_status_changed(&mut self, status: &GestureStatus) {
        (**self).on_status_changed(status)
    }

    fn on_error(&mut self, error: &GestureError) {
        (**self).on_error(error)
    }

    fn on_debug_frame(&mut self, frame: &ImageFrame, info: &DebugInfo) {
        (**self).on_debug_frame(frame, info)
    }
}

/// Ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GestureObserver for NullObserver {}

/// Writes notifications to the `tracing` log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl GestureObserver for LoggingObserver {
    fn on_flash_detected(&mut self, event: &FlashEvent, flash_count: usize) {
        info!(
            target: "flashgesture-core",
            "[GESTURE] Flash at {}ms ({} in window)",
            event.timestamp_ms,
            flash_count
        );
    }

    fn on_status_changed(&mut self, status: &GestureStatus) {
        info!(target: "flashgesture-core", "[GESTURE] {}", status);
    }

    fn on_error(&mut self, error: &GestureError) {
        error!(target: "flashgesture-core", "[GESTURE] ❌ {}", error);
    }

    fn on_debug_frame(&mut self, frame: &ImageFrame, info: &DebugInfo) {
        info!(
            target: "flashgesture-core",
            "[DEBUG] {}x{} frame | {}",
            frame.width(),
            frame.height(),
            info
        );
    }
}
