// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # flashgesture Core
//!
//! Turns a stream of frames into light commands:
//!
//! - [`FlashEventTracker`]: debounces region presence into flash events and
//!   counts them over a sliding window
//! - [`GestureController`]: drives extraction, tracking and actuation per tick,
//!   including the delayed RESET after a DIM
//! - [`TickScheduler`]: fixed-period loop with timing metrics
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::atomic::AtomicBool;
//! use flashgesture_config::FlashGestureConfig;
//! use flashgesture_core::{
//!     ActuationTiming, GestureController, LoggingObserver, MonotonicClock, TickScheduler,
//! };
//! # fn run<A: flashgesture_actuator::Actuator, S: flashgesture_vision::FrameSource>(
//! #     actuator: A, mut source: S) {
//! let config = FlashGestureConfig::default();
//! let mut controller = GestureController::new(
//!     &config.detection,
//!     ActuationTiming::from(&config.actuator),
//!     actuator,
//!     LoggingObserver,
//! )
//! .expect("valid detection parameters");
//!
//! controller.start();
//! let clock = MonotonicClock::new();
//! let running = AtomicBool::new(true);
//! TickScheduler::new(config.frame_source.tick_interval())
//!     .run(&mut controller, &mut source, &clock, &running);
//! controller.shutdown(0);
//! # }
//! ```

pub mod clock;
pub mod controller;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod status;
pub mod tracker;

pub use clock::{Clock, MonotonicClock, NowMs};
pub use controller::{ActuationTiming, FrameObservation, GestureController, TickOutcome};
pub use error::GestureError;
pub use observer::{GestureObserver, LoggingObserver, NullObserver};
pub use scheduler::{RunExit, TickMetrics, TickScheduler};
pub use status::{DebugInfo, GestureStatus};
pub use tracker::{FlashEvent, FlashEventTracker, TorchState, TrackerUpdate};
