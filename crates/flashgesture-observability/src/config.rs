//! Logging configuration types

use serde::{Deserialize, Serialize};

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Options for [`crate::init_logging`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingOptions {
    /// Level applied to crates without a debug flag (trace, debug, info, warn, error)
    pub default_level: String,

    /// Log format (text or json)
    pub format: LogFormat,

    /// Prefer `RUST_LOG` over the flag-derived filter when it is set
    pub honor_rust_log: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        LoggingOptions {
            default_level: "info".to_string(),
            format: LogFormat::Text,
            honor_rust_log: true,
        }
    }
}
