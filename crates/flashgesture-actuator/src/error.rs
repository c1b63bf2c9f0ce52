// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the actuator link.

use crate::ActuatorCommand;

/// Failure to bring the link up. Startup only; the detector keeps running
/// without actuation when this happens.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The OS refused to list serial ports
    #[error("Failed to enumerate serial ports: {0}")]
    Enumeration(String),

    /// No port description matched a configured identifier
    #[error("No serial port matches any of {identifiers:?}")]
    NoCandidatePort { identifiers: Vec<String> },

    #[error("Failed to open {port}: {reason}")]
    Open { port: String, reason: String },

    /// The port opened but the device did not answer TEST with OK
    #[error("Handshake with {port} failed: {reason}")]
    Handshake { port: String, reason: String },
}

/// Failure of a single command exchange. Never retried by the link.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// No connected endpoint; nothing was sent
    #[error("Actuator is not connected")]
    NotConnected,

    #[error("Serial I/O error while sending {command}: {source}")]
    Io {
        command: ActuatorCommand,
        #[source]
        source: std::io::Error,
    },

    /// No complete line arrived before the response timeout
    #[error("No response to {command} within {timeout_ms}ms")]
    Timeout {
        command: ActuatorCommand,
        timeout_ms: u64,
    },

    #[error("Unexpected response to {command}: {response:?}")]
    UnexpectedResponse {
        command: ActuatorCommand,
        response: String,
    },
}

impl CommandError {
    /// The raw line received (newline removed), for `UnexpectedResponse`
    pub fn response(&self) -> Option<&str> {
        match self {
            CommandError::UnexpectedResponse { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Command that was in flight, if one was sent
    pub fn command(&self) -> Option<ActuatorCommand> {
        match self {
            CommandError::NotConnected => None,
            CommandError::Io { command, .. }
            | CommandError::Timeout { command, .. }
            | CommandError::UnexpectedResponse { command, .. } => Some(*command),
        }
    }
}
