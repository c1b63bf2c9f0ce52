// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Debounced flash detection.
//!
//! ```text
//!            present && debounce elapsed  (flash event)
//!   OFF  ──────────────────────────────────────────────►  ON
//!    ▲                                                    │
//!    └──────────────────── !present ──────────────────────┘
//!                          (last_off = now)
//! ```
//!
//! A rising edge within `flash_debounce_ms` of the last fall is suppressed
//! and the tracker stays OFF. Flash events are kept in a sliding window and
//! the dim trigger is raised when the windowed count equals the configured
//! trigger count.

use std::collections::VecDeque;

use flashgesture_config::{ConfigResult, DetectionParameters};
use tracing::debug;

use crate::clock::NowMs;

/// A debounced OFF to ON transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashEvent {
    pub timestamp_ms: NowMs,
}

/// Current torch phase and the time it last went dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TorchState {
    pub torch_on: bool,
    /// `None` until the first fall, so the first rising edge always counts
    pub last_off_timestamp_ms: Option<NowMs>,
}

/// Result of feeding one frame to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerUpdate {
    /// Set when this frame produced a flash event
    pub flash: Option<FlashEvent>,
    pub flash_count: usize,
    /// Set on the flash that brings the count to exactly the trigger count
    pub dim_trigger: bool,
}

#[derive(Debug, Clone)]
pub struct FlashEventTracker {
    debounce_ms: u64,
    window_ms: u64,
    trigger_count: usize,
    state: TorchState,
    events: VecDeque<FlashEvent>,
    latest_timestamp_ms: NowMs,
}

impl FlashEventTracker {
    pub fn new(params: &DetectionParameters) -> ConfigResult<Self> {
        params.validate()?;
        Ok(FlashEventTracker {
            debounce_ms: params.flash_debounce_ms,
            window_ms: params.retention_window_ms,
            trigger_count: params.trigger_flash_count,
            state: TorchState::default(),
            events: VecDeque::new(),
            latest_timestamp_ms: 0,
        })
    }

    /// Feed one frame's detection result.
    ///
    /// Timestamps earlier than one already seen are clamped to it.
    pub fn observe(&mut self, timestamp_ms: NowMs, region_present: bool) -> TrackerUpdate {
        let now = timestamp_ms.max(self.latest_timestamp_ms);
        self.latest_timestamp_ms = now;

        let mut update = TrackerUpdate {
            flash: None,
            flash_count: self.events.len(),
            dim_trigger: false,
        };

        match (self.state.torch_on, region_present) {
            (false, true) => {
                if !self.debounce_elapsed(now) {
                    debug!(
                        target: "flashgesture-core",
                        "[TRACKER] Rising edge at {}ms suppressed by debounce",
                        now
                    );
                    return update;
                }

                self.state.torch_on = true;
                let event = FlashEvent { timestamp_ms: now };
                self.events.push_back(event);
                self.prune(now);

                update.flash = Some(event);
                update.flash_count = self.events.len();
                update.dim_trigger = update.flash_count == self.trigger_count;
                debug!(
                    target: "flashgesture-core",
                    "[TRACKER] Flash at {}ms, {} in window",
                    now,
                    update.flash_count
                );
            }
            (true, false) => {
                self.state.torch_on = false;
                self.state.last_off_timestamp_ms = Some(now);
            }
            (true, true) | (false, false) => {}
        }

        update
    }

    /// Forget all flash events. Torch phase and last fall are kept.
    pub fn reset_count(&mut self) {
        self.events.clear();
    }

    /// Number of retained flash events
    pub fn flash_count(&self) -> usize {
        self.events.len()
    }

    pub fn torch_state(&self) -> TorchState {
        self.state
    }

    /// Retained events, oldest first
    pub fn events(&self) -> impl Iterator<Item = &FlashEvent> {
        self.events.iter()
    }

    fn debounce_elapsed(&self, now: NowMs) -> bool {
        match self.state.last_off_timestamp_ms {
            None => true,
            Some(last_off) => now.saturating_sub(last_off) > self.debounce_ms,
        }
    }

    fn prune(&mut self, now: NowMs) {
        while let Some(oldest) = self.events.front() {
            if now.saturating_sub(oldest.timestamp_ms) > self.window_ms {
                self.events.pop_front();
            } else {
                break;
            }
        }
    }
}
