//! This module contains automated testcases that require an i2c-tiny-usb adapter with an SHT3x
//! sensor at the default address, so they're not run by default. If you want to include them,
//! run the tests with: `cargo test --features hw-tests`

use serial_test::serial;

use crate::usb::{devices, UsbAdapter};
use crate::{DeviceAddress, Sht3x, Status, Transport};

#[test]
#[serial]
pub fn test_connect() {
    assert_eq!(devices().unwrap().len(), 1);
    UsbAdapter::default().acquire().unwrap();
}

#[test]
#[serial]
pub fn test_measure() {
    let mut sht = Sht3x::new(UsbAdapter::default());
    sht.update(DeviceAddress::A0).unwrap();
    assert_eq!(sht.status(), Status::Ok);
    // plausible for a sensor sitting on a desk
    assert!((0.0..50.0).contains(&sht.temperature_celsius()));
    assert!((1.0..99.0).contains(&sht.humidity_percent()));
}

#[test]
#[serial]
pub fn test_absent_address() {
    let mut sht = Sht3x::new(UsbAdapter::default());
    sht.update(DeviceAddress::new(0x42 << 1)).unwrap_err();
    assert_eq!(sht.status(), Status::WriteFailed);
}
