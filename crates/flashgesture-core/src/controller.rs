// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Gesture orchestration.
//!
//! Each tick the controller:
//! 1. runs deferred work that has come due (the RESET after a DIM)
//! 2. reads a frame and extracts bright regions
//! 3. feeds region presence to the tracker
//! 4. on the dim trigger, sends DIM and schedules a RESET
//!
//! The RESET is a deadline checked on every tick, so nothing runs in the
//! background. Command exchanges block for at most the actuator's response
//! timeout.

use flashgesture_actuator::{Actuator, ActuatorCommand, CommandError};
use flashgesture_config::{ActuatorConfig, ConfigResult, DetectionParameters};
use flashgesture_vision::{BrightRegionExtractor, FrameSource, ImageFrame, Rect, SourceError};
use tracing::{debug, error, info, warn};

use crate::clock::NowMs;
use crate::error::GestureError;
use crate::observer::GestureObserver;
use crate::status::{DebugInfo, GestureStatus};
use crate::tracker::{FlashEventTracker, TorchState};

/// What one frame showed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameObservation {
    pub timestamp_ms: NowMs,
    pub region_detected: bool,
    pub bounding_boxes: Vec<Rect>,
}

/// Result of one [`GestureController::tick`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Observed(FrameObservation),
    /// The frame could not be read; detection continues next tick
    FrameSkipped,
    /// The frame source has nothing more to give
    SourceExhausted,
    /// The controller has been shut down
    Stopped,
}

/// Actuation timing taken from [`ActuatorConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuationTiming {
    pub actuator_enabled: bool,
    pub reset_delay_ms: u64,
    pub reset_retry_limit: u32,
    pub reset_retry_backoff_ms: u64,
}

impl From<&ActuatorConfig> for ActuationTiming {
    fn from(config: &ActuatorConfig) -> Self {
        ActuationTiming {
            actuator_enabled: config.enabled,
            reset_delay_ms: config.reset_delay_ms,
            reset_retry_limit: config.reset_retry_limit.max(1),
            reset_retry_backoff_ms: config.reset_retry_backoff_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingReset {
    due_ms: NowMs,
    failed_attempts: u32,
}

pub struct GestureController<A: Actuator, O: GestureObserver> {
    extractor: BrightRegionExtractor,
    tracker: FlashEventTracker,
    actuator: A,
    observer: O,
    timing: ActuationTiming,
    status: GestureStatus,
    pending_reset: Option<PendingReset>,
    debug_annotations: bool,
    started: bool,
    stopped: bool,
}

impl<A: Actuator, O: GestureObserver> GestureController<A, O> {
    /// Build a controller. Fails when `params` are out of range.
    pub fn new(
        params: &DetectionParameters,
        timing: ActuationTiming,
        actuator: A,
        observer: O,
    ) -> ConfigResult<Self> {
        Ok(GestureController {
            extractor: BrightRegionExtractor::new(params)?,
            tracker: FlashEventTracker::new(params)?,
            actuator,
            observer,
            timing,
            status: GestureStatus::Initializing,
            pending_reset: None,
            debug_annotations: false,
            started: false,
            stopped: false,
        })
    }

    //region Lifecycle

    /// Connect the actuator. A failure is reported once and detection
    /// continues without actuation.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if !self.timing.actuator_enabled {
            info!(target: "flashgesture-core", "[GESTURE] Actuator disabled, detect-only mode");
            self.set_status(GestureStatus::Detecting);
            return;
        }

        match self.actuator.connect() {
            Ok(()) => {
                info!(target: "flashgesture-core", "[GESTURE] ✓ Actuator ready");
                self.set_status(GestureStatus::Detecting);
            }
            Err(e) => {
                warn!(
                    target: "flashgesture-core",
                    "[GESTURE] ⚠ Actuator unavailable, continuing detect-only: {}",
                    e
                );
                self.observer.on_error(&GestureError::Connect(e));
                self.set_status(GestureStatus::ActuatorUnavailable);
            }
        }
    }

    /// Stop ticking, restore the light if a RESET is pending and close the
    /// actuator.
    ///
    /// A connected actuator sends its own RESET from [`Actuator::shutdown`],
    /// so a pending RESET is not sent twice. If the actuator has dropped off,
    /// the RESET is still attempted so the failure reaches the observer.
    ///
    /// Idempotent; only the first call does anything.
    pub fn shutdown(&mut self, now_ms: NowMs) {
        self.stop(Some(now_ms));
    }

    fn stop(&mut self, now_ms: Option<NowMs>) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        if let Some(pending) = self.pending_reset.take() {
            if self.actuator.is_connected() {
                // actuator shutdown restores the light itself
                info!(
                    target: "flashgesture-core",
                    "[GESTURE] Pending RESET (due at {}ms, now {:?}) left to actuator shutdown",
                    pending.due_ms,
                    now_ms
                );
            } else if let Err(e) = self.actuator.send_command(ActuatorCommand::Reset) {
                error!(
                    target: "flashgesture-core",
                    "[GESTURE] ❌ RESET at shutdown failed, light may stay dimmed: {}",
                    e
                );
                self.observer.on_error(&GestureError::Command(e));
            }
        }

        self.actuator.shutdown();
        info!(target: "flashgesture-core", "[GESTURE] Controller stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    //endregion

    //region Tick

    /// Run one detection step against `source`.
    pub fn tick<S: FrameSource + ?Sized>(&mut self, now_ms: NowMs, source: &mut S) -> TickOutcome {
        if self.stopped {
            return TickOutcome::Stopped;
        }

        self.run_deferred(now_ms);

        match source.read_frame() {
            Ok(frame) => TickOutcome::Observed(self.on_frame(now_ms, &frame)),
            Err(SourceError::Exhausted) => {
                debug!(target: "flashgesture-core", "[GESTURE] Frame source exhausted");
                TickOutcome::SourceExhausted
            }
            Err(e) => {
                warn!(target: "flashgesture-core", "[GESTURE] ⚠ Skipping frame: {}", e);
                self.observer.on_error(&GestureError::Source(e));
                TickOutcome::FrameSkipped
            }
        }
    }

    /// Process a frame that has already been read.
    ///
    /// After shutdown the frame is ignored and nothing is detected.
    pub fn on_frame(&mut self, now_ms: NowMs, frame: &ImageFrame) -> FrameObservation {
        if self.stopped {
            return FrameObservation {
                timestamp_ms: now_ms,
                region_detected: false,
                bounding_boxes: Vec::new(),
            };
        }

        let boxes = self.extractor.extract(frame);
        let region_detected = !boxes.is_empty();
        let update = self.tracker.observe(now_ms, region_detected);

        if let Some(event) = update.flash {
            self.observer.on_flash_detected(&event, update.flash_count);
            self.set_status(GestureStatus::FlashDetected {
                count: update.flash_count,
            });
        }

        if update.dim_trigger {
            info!(
                target: "flashgesture-core",
                "[GESTURE] Flash gesture detected, dimming light"
            );
            self.dim(now_ms);
        }

        if self.debug_annotations {
            let mut annotated = frame.clone();
            BrightRegionExtractor::annotate(&mut annotated, &boxes);
            let info = self.debug_info(now_ms);
            self.observer.on_debug_frame(&annotated, &info);
        }

        FrameObservation {
            timestamp_ms: now_ms,
            region_detected,
            bounding_boxes: boxes,
        }
    }

    /// Execute deferred work whose deadline has passed.
    pub fn run_deferred(&mut self, now_ms: NowMs) {
        let Some(pending) = self.pending_reset else {
            return;
        };
        if now_ms < pending.due_ms {
            return;
        }

        match self.actuator.send_command(ActuatorCommand::Reset) {
            Ok(()) => {
                self.pending_reset = None;
                info!(target: "flashgesture-core", "[GESTURE] ✓ Light reset");
                self.set_status(GestureStatus::LightReset);
            }
            Err(e) => {
                let failed_attempts = pending.failed_attempts + 1;
                error!(
                    target: "flashgesture-core",
                    "[GESTURE] ❌ RESET attempt {}/{} failed: {}",
                    failed_attempts,
                    self.timing.reset_retry_limit,
                    e
                );
                self.observer.on_error(&GestureError::Command(e));

                if failed_attempts >= self.timing.reset_retry_limit {
                    self.pending_reset = None;
                    error!(
                        target: "flashgesture-core",
                        "[GESTURE] ❌ Giving up on RESET, light is stuck dimmed"
                    );
                    self.observer.on_error(&GestureError::ResetEscalated {
                        attempts: failed_attempts,
                    });
                    self.set_status(GestureStatus::LightStuckDimmed);
                } else {
                    self.pending_reset = Some(PendingReset {
                        due_ms: now_ms.saturating_add(self.timing.reset_retry_backoff_ms),
                        failed_attempts,
                    });
                }
            }
        }
    }

    fn dim(&mut self, now_ms: NowMs) {
        match self.actuator.send_command(ActuatorCommand::Dim) {
            Ok(()) => {
                let due_ms = now_ms.saturating_add(self.timing.reset_delay_ms);
                if self.pending_reset.is_some() {
                    debug!(target: "flashgesture-core", "[GESTURE] Re-arming pending RESET");
                }
                self.pending_reset = Some(PendingReset {
                    due_ms,
                    failed_attempts: 0,
                });
                info!(
                    target: "flashgesture-core",
                    "[GESTURE] ✓ Light dimmed, RESET due at {}ms",
                    due_ms
                );
                self.set_status(GestureStatus::LightDimmed);
            }
            Err(e) => {
                let message = match &e {
                    CommandError::NotConnected => e.to_string(),
                    _ => format!("Failed to dim light: {}", e),
                };
                warn!(target: "flashgesture-core", "[GESTURE] ⚠ {}", message);
                self.observer.on_error(&GestureError::Command(e));
                self.set_status(GestureStatus::Error(message));
            }
        }
    }

    //endregion

    //region Queries and Controls

    /// Clear the flash history; torch phase is untouched.
    pub fn reset_count(&mut self) {
        self.tracker.reset_count();
        self.set_status(GestureStatus::CountReset);
    }

    pub fn current_flash_count(&self) -> usize {
        self.tracker.flash_count()
    }

    pub fn current_torch_state(&self) -> TorchState {
        self.tracker.torch_state()
    }

    pub fn status(&self) -> &GestureStatus {
        &self.status
    }

    /// Flip debug annotations, returning the new setting.
    pub fn toggle_debug_annotations(&mut self) -> bool {
        self.debug_annotations = !self.debug_annotations;
        info!(
            target: "flashgesture-core",
            "[GESTURE] Debug annotations {}",
            if self.debug_annotations { "enabled" } else { "disabled" }
        );
        self.debug_annotations
    }

    pub fn debug_annotations_enabled(&self) -> bool {
        self.debug_annotations
    }

    pub fn debug_info(&self, now_ms: NowMs) -> DebugInfo {
        let torch = self.tracker.torch_state();
        DebugInfo {
            flash_count: self.tracker.flash_count(),
            torch_on: torch.torch_on,
            ms_since_last_off: torch
                .last_off_timestamp_ms
                .map(|last_off| now_ms.saturating_sub(last_off)),
        }
    }

    /// Deadline of the scheduled RESET, if one is pending
    pub fn reset_due_ms(&self) -> Option<NowMs> {
        self.pending_reset.map(|pending| pending.due_ms)
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    //endregion

    fn set_status(&mut self, status: GestureStatus) {
        if self.status != status {
            self.status = status;
            self.observer.on_status_changed(&self.status);
        }
    }
}

impl<A: Actuator, O: GestureObserver> Drop for GestureController<A, O> {
    fn drop(&mut self) {
        if !self.stopped {
            warn!(
                target: "flashgesture-core",
                "[GESTURE] ⚠ Controller dropped without shutdown, closing actuator"
            );
            self.stop(None);
        }
    }
}
