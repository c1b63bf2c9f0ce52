// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

/// Line the actuator answers every accepted command with
pub const ACK_TOKEN: &str = "OK";

/// Commands understood by the actuator firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorCommand {
    /// Handshake probe sent once after opening the port
    Test,
    /// Dim the light
    Dim,
    /// Restore the light to its normal level
    Reset,
}

impl ActuatorCommand {
    /// ASCII token sent on the wire, without the line terminator
    pub fn as_token(&self) -> &'static str {
        match self {
            ActuatorCommand::Test => "TEST",
            ActuatorCommand::Dim => "DIM",
            ActuatorCommand::Reset => "RESET",
        }
    }

    /// Complete wire frame: token followed by `\n`
    pub fn to_line(&self) -> Vec<u8> {
        let mut line = self.as_token().as_bytes().to_vec();
        line.push(b'\n');
        line
    }
}

impl Display for ActuatorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}
