//! Host transport for USB-to-I2C adapters speaking the i2c-tiny-usb protocol.

mod connection;
mod protocol;

use std::io::{self, Read, Write};

use log::debug;
use rusb::{Device, DeviceHandle, GlobalContext, UsbContext};

use crate::{Bus, Transport, UsbError};

pub use protocol::KNOWN_VENDOR_PRODUCT_IDS;

/// Lists attached adapters with a known VID/PID combination.
pub fn devices() -> rusb::Result<Vec<Device<GlobalContext>>> {
    Ok(rusb::devices()?
        .iter()
        .filter(|dev| match dev.device_descriptor() {
            Ok(desc) => KNOWN_VENDOR_PRODUCT_IDS.contains(&(desc.vendor_id(), desc.product_id())),
            Err(_) => false,
        })
        .collect())
}

/// An opened adapter. Implements the `i2c` crate traits and therefore [`Bus`].
pub struct UsbBus<T: UsbContext> {
    device_handle: DeviceHandle<T>,
    address: u16,
}

impl<T: UsbContext> UsbBus<T> {
    pub fn open(device: &Device<T>) -> Result<Self, UsbError> {
        let device_handle = device.open()?;
        device_handle.claim_interface(0)?;
        protocol::check_device(&device_handle)?;
        Ok(Self {
            device_handle,
            address: 0,
        })
    }
}

impl<T: UsbContext> i2c::Master for UsbBus<T> {
    type Error = UsbError;
}

impl<T: UsbContext> i2c::Address for UsbBus<T> {
    fn set_slave_address(&mut self, addr: u16, tenbit: bool) -> Result<(), UsbError> {
        if tenbit {
            return Err(rusb::Error::NotSupported.into());
        }
        self.address = addr;
        Ok(())
    }
}

impl<T: UsbContext> Read for UsbBus<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        protocol::read(&self.device_handle, self.address, buf)?;
        Ok(buf.len())
    }
}

impl<T: UsbContext> Write for UsbBus<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        protocol::write(&self.device_handle, self.address, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(()) // every write is a complete transaction
    }
}

#[allow(dead_code)]
const fn assert_impl_bus<T: Bus>() {}
const _: () = assert_impl_bus::<UsbBus<GlobalContext>>();

/// Which attached adapter [`UsbAdapter`] opens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The only attached adapter; fails if there are several.
    #[default]
    Single,
    /// The adapter at a USB bus number and device address.
    At { bus: u8, address: u8 },
}

/// [`Transport`] that opens an adapter for every transaction and closes it afterwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsbAdapter {
    selection: Selection,
}

impl UsbAdapter {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }

    fn find(&self) -> Result<Device<GlobalContext>, UsbError> {
        let mut devs = devices()?;
        match self.selection {
            Selection::Single => {
                if devs.len() > 1 {
                    return Err(rusb::Error::Other.into());
                }
                devs.pop().ok_or(rusb::Error::NoDevice.into())
            }
            Selection::At { bus, address } => devs
                .into_iter()
                .find(|dev| dev.bus_number() == bus && dev.address() == address)
                .ok_or(rusb::Error::NoDevice.into()),
        }
    }
}

impl Transport for UsbAdapter {
    type Bus = UsbBus<GlobalContext>;

    fn acquire(&mut self) -> io::Result<Self::Bus> {
        let device = self.find()?;
        debug!(
            "opening i2c-tiny-usb adapter on bus {} address {}",
            device.bus_number(),
            device.address()
        );
        Ok(UsbBus::open(&device)?)
    }
}
