// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::time::Instant;

/// Milliseconds on a monotonic timeline
pub type NowMs = u64;

/// Source of monotonic timestamps for the tick loop
pub trait Clock {
    fn now_ms(&self) -> NowMs;
}

/// Milliseconds elapsed since construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> NowMs {
        self.origin.elapsed().as_millis() as NowMs
    }
}
