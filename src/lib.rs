//! Driver for Sensirion SHT3x (SHT30, SHT31, SHT35) temperature and humidity sensors using the
//! one-shot, high repeatability, clock stretching measurement mode.
//!
//! ```no_run
//! use sht3x_oneshot::{usb::UsbAdapter, DeviceAddress, Sht3x};
//!
//! let mut sht = Sht3x::new(UsbAdapter::default());
//! if sht.update(DeviceAddress::A0).is_ok() {
//!     println!("{:.2}°C {:.2}%RH", sht.temperature_celsius(), sht.humidity_percent());
//! }
//! println!("status {}", sht.status().code());
//! ```

mod bus;
mod config;
pub mod conversions;
pub mod crc;
mod error;
pub mod frame;
mod sensor;
pub mod sim;
pub mod transport;
pub mod usb;

#[cfg(all(test, feature = "hw-tests"))]
mod hw_tests;

pub use bus::{Bus, Clock, DeviceAddress, ThreadClock, Transport};
pub use config::*;
pub use error::*;
pub use frame::RawReading;
pub use sensor::Sht3x;
pub use i2c;
pub use rusb;
