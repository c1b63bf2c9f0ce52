// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Host serial ports through the `serialport` crate.

use std::io::{self, Read, Write};
use std::time::Duration;

use serialport::{SerialPort, SerialPortType};
use tracing::debug;

use crate::serial::{PortDescriptor, SerialBackend, SerialIO};

/// Backend over the operating system's serial ports
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSerialBackend;

impl SystemSerialBackend {
    pub fn new() -> Self {
        SystemSerialBackend
    }
}

/// An open OS serial port
pub struct SystemSerialPort {
    inner: Box<dyn SerialPort>,
}

impl SerialIO for SystemSerialPort {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.inner.write(data)
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buffer) {
            Ok(n) => Ok(n),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl SerialBackend for SystemSerialBackend {
    type Port = SystemSerialPort;

    fn enumerate(&self) -> io::Result<Vec<PortDescriptor>> {
        let ports = serialport::available_ports().map_err(io::Error::from)?;
        let descriptors = ports
            .into_iter()
            .map(|info| {
                let mut descriptor = PortDescriptor::new(info.port_name);
                match info.port_type {
                    SerialPortType::UsbPort(usb) => {
                        descriptor.description =
                            Some(format!("USB {:04x}:{:04x}", usb.vid, usb.pid));
                        descriptor.manufacturer = usb.manufacturer;
                        descriptor.product = usb.product;
                    }
                    SerialPortType::BluetoothPort => {
                        descriptor.description = Some("Bluetooth".to_string());
                    }
                    SerialPortType::PciPort => {
                        descriptor.description = Some("PCI".to_string());
                    }
                    SerialPortType::Unknown => {}
                }
                descriptor
            })
            .collect::<Vec<_>>();
        debug!(
            target: "flashgesture-actuator",
            "[ACTUATOR] Enumerated {} serial ports",
            descriptors.len()
        );
        Ok(descriptors)
    }

    fn open(
        &self,
        port: &PortDescriptor,
        baud_rate: u32,
        poll_interval: Duration,
    ) -> io::Result<SystemSerialPort> {
        let inner = serialport::new(port.name.as_str(), baud_rate)
            .timeout(poll_interval)
            .open()
            .map_err(io::Error::from)?;
        Ok(SystemSerialPort { inner })
    }
}
