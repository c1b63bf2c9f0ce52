// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serial transport abstraction.
//!
//! The link never talks to the OS directly. A [`SerialBackend`] lists and
//! opens endpoints and each open endpoint is a [`SerialIO`]. The default
//! backend wraps the `serialport` crate; tests plug in a scripted device.

use std::io;
use std::time::Duration;

/// One open serial endpoint
pub trait SerialIO {
    /// Write bytes to the serial port
    ///
    /// # Returns
    /// Number of bytes written or error
    fn write(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Read whatever bytes have arrived
    ///
    /// Returns `Ok(0)` when nothing arrived within the port's poll interval;
    /// a timeout is not an error at this level.
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize>;

    /// Flush output buffer
    fn flush(&mut self) -> io::Result<()>;
}

impl<T: SerialIO + ?Sized> SerialIO for Box<T> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        (**self).write(data)
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        (**self).read(buffer)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Description of an endpoint as reported by enumeration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortDescriptor {
    /// OS name, e.g. `/dev/ttyUSB0` or `COM3`
    pub name: String,
    pub description: Option<String>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

impl PortDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        PortDescriptor {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when any descriptive field contains one of `identifiers`.
    pub fn matches_any(&self, identifiers: &[String]) -> bool {
        let fields = [
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.manufacturer.as_deref(),
            self.product.as_deref(),
        ];
        identifiers.iter().any(|needle| {
            fields
                .iter()
                .flatten()
                .any(|field| field.contains(needle.as_str()))
        })
    }
}

/// Enumerates and opens serial endpoints
pub trait SerialBackend {
    type Port: SerialIO;

    /// List the endpoints currently present.
    fn enumerate(&self) -> io::Result<Vec<PortDescriptor>>;

    /// Open `port` at `baud_rate`. Reads on the returned endpoint wait at most
    /// `poll_interval` before returning `Ok(0)`.
    fn open(
        &self,
        port: &PortDescriptor,
        baud_rate: u32,
        poll_interval: Duration,
    ) -> io::Result<Self::Port>;
}
