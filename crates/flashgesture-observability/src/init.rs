// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Console logging initialization

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingOptions};

/// Build the filter the subscriber will use
///
/// `RUST_LOG` wins when it is set and `honor_rust_log` is on; otherwise the
/// filter comes from the debug flags plus the default level.
pub fn build_env_filter(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> EnvFilter {
    if options.honor_rust_log {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(debug_flags.to_filter_string(&options.default_level))
}

/// Initialize console logging
///
/// # Errors
///
/// Fails if a global subscriber has already been installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<()> {
    let env_filter = build_env_filter(debug_flags, options);

    let console_layer = match options.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(debug_flags.any_enabled())
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .boxed(),
    };

    Registry::default()
        .with(console_layer.with_filter(env_filter))
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Initialize logging with default settings
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<()> {
    init_logging(debug_flags, &LoggingOptions::default())
}
