// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Line protocol link to the actuator.
//!
//! ## Protocol
//!
//! ASCII lines terminated by `\n`. The host sends one of `TEST`, `DIM`,
//! `RESET`; the device answers each with `OK`. Any other answer, or no
//! complete line within the response timeout, is a protocol error.
//!
//! ```text
//! host                          device
//!  | -- open @ 9600 baud ------->  |  (board resets, settle delay)
//!  | -- TEST\n ----------------->  |
//!  | <---------------------- OK\n  |  connected
//!  | -- DIM\n ------------------>  |
//!  | <---------------------- OK\n  |
//! ```

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use flashgesture_config::ActuatorConfig;
use tracing::{debug, info, warn};

use crate::command::{ActuatorCommand, ACK_TOKEN};
use crate::error::{CommandError, ConnectError};
use crate::serial::{SerialBackend, SerialIO};
use crate::Actuator;

/// Longest a single endpoint read may block
const READ_POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Lines longer than this without a terminator are discarded
const MAX_LINE_LENGTH: usize = 256;

/// Observable link state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActuatorSession {
    pub connected: bool,
    /// Name of the open port while connected
    pub port_identifier: Option<String>,
    /// Command currently awaiting its acknowledgement
    pub pending_command: Option<ActuatorCommand>,
}

/// Serial link settings taken from [`ActuatorConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSettings {
    pub identifier_substrings: Vec<String>,
    pub baud_rate: u32,
    pub settle_delay: Duration,
    pub response_timeout: Duration,
}

impl From<&ActuatorConfig> for LinkSettings {
    fn from(config: &ActuatorConfig) -> Self {
        LinkSettings {
            identifier_substrings: config.identifier_substrings.clone(),
            baud_rate: config.baud_rate,
            settle_delay: config.settle_delay(),
            response_timeout: config.response_timeout(),
        }
    }
}

/// Connection to the actuator over a [`SerialBackend`]
pub struct ActuatorLink<B: SerialBackend> {
    backend: B,
    settings: LinkSettings,
    port: Option<B::Port>,
    session: ActuatorSession,
    rx_buffer: Vec<u8>,
}

impl<B: SerialBackend> ActuatorLink<B> {
    pub fn new(backend: B, settings: LinkSettings) -> Self {
        ActuatorLink {
            backend,
            settings,
            port: None,
            session: ActuatorSession::default(),
            rx_buffer: Vec::new(),
        }
    }

    pub fn from_config(backend: B, config: &ActuatorConfig) -> Self {
        Self::new(backend, LinkSettings::from(config))
    }

    pub fn session(&self) -> &ActuatorSession {
        &self.session
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    /// Find, open and handshake with the actuator.
    ///
    /// The first port whose description contains a configured identifier is
    /// used. On any failure the link stays disconnected.
    pub fn connect(&mut self) -> Result<(), ConnectError> {
        if self.session.connected {
            debug!(target: "flashgesture-actuator", "[ACTUATOR] Already connected");
            return Ok(());
        }

        let ports = self
            .backend
            .enumerate()
            .map_err(|e| ConnectError::Enumeration(e.to_string()))?;
        let candidate = ports
            .into_iter()
            .find(|port| port.matches_any(&self.settings.identifier_substrings))
            .ok_or_else(|| ConnectError::NoCandidatePort {
                identifiers: self.settings.identifier_substrings.clone(),
            })?;

        info!(
            target: "flashgesture-actuator",
            "[ACTUATOR] Opening {} at {} baud",
            candidate.name, self.settings.baud_rate
        );
        let port = self
            .backend
            .open(&candidate, self.settings.baud_rate, READ_POLL_INTERVAL)
            .map_err(|e| ConnectError::Open {
                port: candidate.name.clone(),
                reason: e.to_string(),
            })?;

        // the board reboots when the port opens
        if !self.settings.settle_delay.is_zero() {
            thread::sleep(self.settings.settle_delay);
        }

        self.port = Some(port);
        self.rx_buffer.clear();
        if let Err(e) = self.exchange(ActuatorCommand::Test) {
            self.port = None;
            return Err(ConnectError::Handshake {
                port: candidate.name,
                reason: e.to_string(),
            });
        }

        info!(
            target: "flashgesture-actuator",
            "[ACTUATOR] ✓ Connected to {}",
            candidate.name
        );
        self.session.connected = true;
        self.session.port_identifier = Some(candidate.name);
        Ok(())
    }

    /// Send one command and wait for its `OK`. No retries.
    pub fn send_command(&mut self, command: ActuatorCommand) -> Result<(), CommandError> {
        if !self.session.connected {
            return Err(CommandError::NotConnected);
        }

        self.session.pending_command = Some(command);
        let result = self.exchange(command);
        self.session.pending_command = None;

        match &result {
            Ok(()) => debug!(target: "flashgesture-actuator", "[ACTUATOR] {} acknowledged", command),
            Err(e) => warn!(target: "flashgesture-actuator", "[ACTUATOR] ⚠ {}", e),
        }
        result
    }

    /// Best-effort RESET, then release the port. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if !self.session.connected {
            return;
        }

        if let Err(e) = self.send_command(ActuatorCommand::Reset) {
            warn!(
                target: "flashgesture-actuator",
                "[ACTUATOR] ⚠ RESET during shutdown failed: {}",
                e
            );
        }

        self.port = None;
        self.rx_buffer.clear();
        self.session = ActuatorSession::default();
        info!(target: "flashgesture-actuator", "[ACTUATOR] Link closed");
    }

    fn exchange(&mut self, command: ActuatorCommand) -> Result<(), CommandError> {
        let timeout = self.settings.response_timeout;
        let port = self.port.as_mut().ok_or(CommandError::NotConnected)?;

        // a late answer to an earlier command must not acknowledge this one
        self.rx_buffer.clear();
        write_all(port, &command.to_line())
            .and_then(|_| port.flush())
            .map_err(|source| CommandError::Io { command, source })?;

        let line = read_line(port, &mut self.rx_buffer, timeout)
            .map_err(|source| CommandError::Io { command, source })?
            .ok_or(CommandError::Timeout {
                command,
                timeout_ms: timeout.as_millis() as u64,
            })?;

        if line.trim() == ACK_TOKEN {
            Ok(())
        } else {
            Err(CommandError::UnexpectedResponse {
                command,
                response: line,
            })
        }
    }
}

impl<B: SerialBackend> Actuator for ActuatorLink<B> {
    fn connect(&mut self) -> Result<(), ConnectError> {
        ActuatorLink::connect(self)
    }

    fn send_command(&mut self, command: ActuatorCommand) -> Result<(), CommandError> {
        ActuatorLink::send_command(self, command)
    }

    fn is_connected(&self) -> bool {
        self.session.connected
    }

    fn shutdown(&mut self) {
        ActuatorLink::shutdown(self)
    }
}

fn write_all<P: SerialIO>(port: &mut P, mut data: &[u8]) -> io::Result<()> {
    while !data.is_empty() {
        let written = port.write(data)?;
        if written == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "serial port accepted no bytes",
            ));
        }
        data = &data[written..];
    }
    Ok(())
}

/// Read until one `\n`-terminated line is buffered or `timeout` passes.
///
/// Returns the line without its terminator (and without a trailing `\r`),
/// or `None` on timeout. Bytes after the terminator stay in `buffer`.
fn read_line<P: SerialIO>(
    port: &mut P,
    buffer: &mut Vec<u8>,
    timeout: Duration,
) -> io::Result<Option<String>> {
    let deadline = Instant::now() + timeout;
    let mut chunk = [0u8; 64];

    loop {
        if let Some(end) = buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = buffer.drain(..=end).collect();
            return Ok(Some(String::from_utf8_lossy(&raw[..end]).into_owned()));
        }
        if buffer.len() > MAX_LINE_LENGTH {
            buffer.clear();
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }

        let n = port.read(&mut chunk)?;
        if n == 0 {
            thread::sleep(Duration::from_millis(1));
        } else {
            buffer.extend_from_slice(&chunk[..n]);
        }
    }
}
