// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # flashgesture Actuator
//!
//! Serial link to the light actuator. The link finds the board by port
//! description, performs a `TEST`/`OK` handshake, then exchanges one-line
//! commands (`DIM`, `RESET`) each acknowledged by `OK`.
//!
//! ## Features
//!
//! - `system-serial` (default): [`SystemSerialBackend`] over the host's
//!   serial ports
//!
//! Without it, implement [`SerialBackend`] for your own transport.

pub mod command;
pub mod error;
pub mod link;
pub mod serial;
#[cfg(feature = "system-serial")]
pub mod system;

pub use command::{ActuatorCommand, ACK_TOKEN};
pub use error::{CommandError, ConnectError};
pub use link::{ActuatorLink, ActuatorSession, LinkSettings};
pub use serial::{PortDescriptor, SerialBackend, SerialIO};
#[cfg(feature = "system-serial")]
pub use system::{SystemSerialBackend, SystemSerialPort};

/// Something that executes light commands
///
/// [`ActuatorLink`] is the real implementation; the controller only sees
/// this trait.
pub trait Actuator {
    /// Bring the actuator online.
    fn connect(&mut self) -> Result<(), ConnectError>;

    /// Execute one command, returning once it is acknowledged.
    fn send_command(&mut self, command: ActuatorCommand) -> Result<(), CommandError>;

    fn is_connected(&self) -> bool;

    /// Send a best-effort RESET when connected, then release the device.
    /// Idempotent.
    fn shutdown(&mut self);
}

impl<A: Actuator + ?Sized> Actuator for Box<A> {
    fn connect(&mut self) -> Result<(), ConnectError> {
        (**self).connect()
    }

    fn send_command(&mut self, command: ActuatorCommand) -> Result<(), CommandError> {
        (**self).send_command(command)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}
