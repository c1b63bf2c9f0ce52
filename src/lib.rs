// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # flashgesture
//!
//! Watches camera frames for a handheld flashlight and dims a light through a
//! serial actuator when the flashlight is flashed twice in quick succession.
//! The light is restored automatically after a delay.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! flashgesture = "0.1"
//! ```
//!
//! ## Components
//!
//! - [`config`]: TOML configuration with environment and CLI overrides
//! - [`observability`]: `tracing` subscriber setup and per-crate debug flags
//! - [`vision`]: frame model and bright region extraction
//! - [`actuator`]: serial line protocol link (`TEST`/`DIM`/`RESET`, answered by `OK`)
//! - [`core`]: flash tracking, gesture control and the tick scheduler
//!
//! ## Usage
//!
//! ```rust,no_run
//! use flashgesture::prelude::*;
//!
//! # fn frames() -> Box<dyn FrameSource> { unimplemented!() }
//! let config = load_config_or_default(None, None).expect("config");
//! let actuator = ActuatorLink::from_config(SystemSerialBackend::new(), &config.actuator);
//! let mut controller = GestureController::new(
//!     &config.detection,
//!     ActuationTiming::from(&config.actuator),
//!     actuator,
//!     LoggingObserver,
//! )
//! .expect("valid parameters");
//!
//! controller.start();
//! let mut source = frames();
//! let clock = MonotonicClock::new();
//! let outcome = controller.tick(clock.now_ms(), &mut source);
//! controller.shutdown(clock.now_ms());
//! ```

pub use flashgesture_actuator as actuator;
pub use flashgesture_config as config;
pub use flashgesture_core as core;
pub use flashgesture_observability as observability;
pub use flashgesture_vision as vision;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use flashgesture_actuator::{
        Actuator, ActuatorCommand, ActuatorLink, CommandError, ConnectError, SystemSerialBackend,
    };
    pub use flashgesture_config::{
        load_config, load_config_or_default, validate_config, ConfigError, DetectionParameters,
        FlashGestureConfig,
    };
    pub use flashgesture_core::{
        ActuationTiming, Clock, FlashEvent, FlashEventTracker, GestureController, GestureError,
        GestureObserver, GestureStatus, LoggingObserver, MonotonicClock, NullObserver,
        TickOutcome, TickScheduler, TorchState,
    };
    pub use flashgesture_vision::{BrightRegionExtractor, FrameSource, ImageFrame, Rect, SourceError};
}
