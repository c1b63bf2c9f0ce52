// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-period tick loop with timing metrics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use flashgesture_actuator::Actuator;
use flashgesture_vision::FrameSource;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::controller::{GestureController, TickOutcome};
use crate::observer::GestureObserver;

/// Counters collected while ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickMetrics {
    pub total_ticks: u64,
    /// Ticks that took longer than the frame budget
    pub deadline_misses: u64,
    pub worst_case: Duration,
    pub skipped_frames: u64,
}

/// Why [`TickScheduler::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// The running flag was cleared
    Interrupted,
    SourceExhausted,
    ControllerStopped,
}

pub struct TickScheduler {
    frame_budget: Duration,
    metrics: TickMetrics,
}

impl TickScheduler {
    pub fn new(frame_budget: Duration) -> Self {
        TickScheduler {
            frame_budget,
            metrics: TickMetrics::default(),
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    pub fn metrics(&self) -> TickMetrics {
        self.metrics
    }

    /// Run one controller tick and record how long it took.
    pub fn tick<A, O, S, C>(
        &mut self,
        controller: &mut GestureController<A, O>,
        source: &mut S,
        clock: &C,
    ) -> TickOutcome
    where
        A: Actuator,
        O: GestureObserver,
        S: FrameSource + ?Sized,
        C: Clock + ?Sized,
    {
        let start = Instant::now();
        let outcome = controller.tick(clock.now_ms(), source);
        let elapsed = start.elapsed();

        if elapsed > self.frame_budget {
            self.metrics.deadline_misses += 1;
        }
        if elapsed > self.metrics.worst_case {
            self.metrics.worst_case = elapsed;
        }
        if outcome == TickOutcome::FrameSkipped {
            self.metrics.skipped_frames += 1;
        }
        self.metrics.total_ticks += 1;

        outcome
    }

    /// Tick until `running` is cleared, the source runs dry, or the
    /// controller stops. Sleeps out the remainder of each frame budget.
    pub fn run<A, O, S, C>(
        &mut self,
        controller: &mut GestureController<A, O>,
        source: &mut S,
        clock: &C,
        running: &AtomicBool,
    ) -> RunExit
    where
        A: Actuator,
        O: GestureObserver,
        S: FrameSource + ?Sized,
        C: Clock + ?Sized,
    {
        debug!(
            target: "flashgesture-core",
            "[SCHEDULER] Starting tick loop, budget {:?}",
            self.frame_budget
        );

        let exit = loop {
            if !running.load(Ordering::SeqCst) {
                break RunExit::Interrupted;
            }

            let cycle_start = Instant::now();
            match self.tick(controller, source, clock) {
                TickOutcome::SourceExhausted => break RunExit::SourceExhausted,
                TickOutcome::Stopped => break RunExit::ControllerStopped,
                TickOutcome::Observed(_) | TickOutcome::FrameSkipped => {}
            }

            let elapsed = cycle_start.elapsed();
            if elapsed < self.frame_budget {
                std::thread::sleep(self.frame_budget - elapsed);
            }
        };

        self.log_summary();
        exit
    }

    pub fn log_summary(&self) {
        info!(
            target: "flashgesture-core",
            "[SCHEDULER] {} ticks, {} over budget, {} skipped, worst case {:?}",
            self.metrics.total_ticks,
            self.metrics.deadline_misses,
            self.metrics.skipped_frames,
            self.metrics.worst_case
        );
    }
}
