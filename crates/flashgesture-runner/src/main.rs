// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use flashgesture_actuator::{ActuatorLink, SystemSerialBackend};
use flashgesture_config::{load_config_or_default, validate_config, FlashGestureConfig};
use flashgesture_core::{
    ActuationTiming, Clock, GestureController, MonotonicClock, RunExit, TickScheduler,
};
use flashgesture_observability::{init_logging, parse_debug_flags_from, LogFormat, LoggingOptions};
use flashgesture_runner::{ImageSequenceSource, RunnerObserver};

/// flashgesture - dims a light when a flashlight is flashed twice at the camera
#[derive(Parser, Debug)]
#[command(
    name = "flashgesture",
    version,
    long_about = None,
    after_help = "Per-crate debug logging: --debug-all or --debug-<crate-name> (also FLASHGESTURE_DEBUG)."
)]
struct Args {
    /// Path to a flashgesture.toml configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of images replayed as camera frames
    #[arg(short, long)]
    frames: Option<PathBuf>,

    /// Stop at the last frame instead of looping
    #[arg(long, default_value_t = false)]
    no_loop: bool,

    /// Decode all frames before starting
    #[arg(long, default_value_t = false)]
    preload: bool,

    /// Tick interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Brightness threshold (0-255)
    #[arg(long)]
    brightness_threshold: Option<u32>,

    /// Run detect-only, without probing serial ports
    #[arg(long, default_value_t = false)]
    no_actuator: bool,

    /// Start with debug annotations enabled
    #[arg(long, default_value_t = false)]
    debug_annotations: bool,

    /// Write annotated debug frames to this directory (implies --debug-annotations)
    #[arg(long)]
    save_annotated: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    /// CLI values as config overrides, keyed like the config loader expects
    fn config_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(frames) = &self.frames {
            overrides.insert("frames_dir".to_string(), frames.display().to_string());
        }
        if self.no_loop {
            overrides.insert("loop_playback".to_string(), "false".to_string());
        }
        if let Some(tick_ms) = self.tick_ms {
            overrides.insert("tick_interval_ms".to_string(), tick_ms.to_string());
        }
        if let Some(threshold) = self.brightness_threshold {
            overrides.insert("brightness_threshold".to_string(), threshold.to_string());
        }
        if self.no_actuator {
            overrides.insert("actuator_enabled".to_string(), "false".to_string());
        }
        if self.verbose {
            overrides.insert("log_level".to_string(), "debug".to_string());
        }
        overrides
    }
}

/// Main entry point
fn main() -> Result<()> {
    // Debug flags are free-form, so keep them away from clap
    let mut debug_args = Vec::new();
    let mut cli_args = Vec::new();
    for (index, arg) in std::env::args().enumerate() {
        if index > 0 && is_crate_debug_flag(&arg) {
            debug_args.push(arg);
        } else {
            cli_args.push(arg);
        }
    }

    let args = Args::parse_from(cli_args);
    let debug_flags = parse_debug_flags_from(debug_args);

    let config = load_config_or_default(args.config.as_deref(), Some(&args.config_overrides()))
        .context("Failed to load configuration")?;
    validate_config(&config).context("Invalid configuration")?;

    init_logging(
        &debug_flags,
        &LoggingOptions {
            default_level: config.logging.level.clone(),
            format: if config.logging.json {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            honor_rust_log: true,
        },
    )?;

    info!("flashgesture v{}", env!("CARGO_PKG_VERSION"));
    run(&args, &config)?;

    info!("✅ flashgesture shutdown complete");
    Ok(())
}

fn is_crate_debug_flag(arg: &str) -> bool {
    arg.starts_with("--debug-") && arg != "--debug-annotations"
}

fn run(args: &Args, config: &FlashGestureConfig) -> Result<()> {
    let frames_dir = config
        .frame_source
        .frames_dir
        .as_ref()
        .context("No frame source: pass --frames or set frame_source.frames_dir")?;

    let mut source = ImageSequenceSource::open(frames_dir, config.frame_source.loop_playback)?;
    if args.preload {
        source.preload()?;
    }

    let actuator = ActuatorLink::from_config(SystemSerialBackend::new(), &config.actuator);
    let observer = RunnerObserver::new(args.save_annotated.as_deref())?;
    let mut controller = GestureController::new(
        &config.detection,
        ActuationTiming::from(&config.actuator),
        actuator,
        observer,
    )?;
    if args.debug_annotations || args.save_annotated.is_some() {
        controller.toggle_debug_annotations();
    }

    // Setup signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Shutdown signal received...");
        r.store(false, Ordering::SeqCst);
    })?;

    info!(
        "🚀 Detecting: threshold {}, debounce {}ms, tick {}ms",
        config.detection.brightness_threshold,
        config.detection.flash_debounce_ms,
        config.frame_source.tick_interval_ms
    );
    controller.start();

    let clock = MonotonicClock::new();
    let mut scheduler = TickScheduler::new(config.frame_source.tick_interval());
    info!("🔄 Running (Press Ctrl+C to stop)...");
    let exit = scheduler.run(&mut controller, &mut source, &clock, &running);
    if exit == RunExit::SourceExhausted {
        info!("Frame sequence finished after {} frames", source.frames_served());
    }

    controller.shutdown(clock.now_ms());
    if controller.observer().frames_written() > 0 {
        info!(
            "Wrote {} annotated frames",
            controller.observer().frames_written()
        );
    }
    if scheduler.metrics().deadline_misses > 0 {
        warn!(
            "{} ticks exceeded the {:?} budget",
            scheduler.metrics().deadline_misses,
            scheduler.frame_budget()
        );
    }
    Ok(())
}
