use std::time::Duration;

use rusb::{DeviceHandle, UsbContext};

// control transfer parameters
pub const TIMEOUT: Duration = Duration::from_secs(1);

/// Vendor control transfers addressed to interface 0, the only kind of transfer the
/// i2c-tiny-usb protocol uses. Replaced with `MockConnection` in tests.
pub(crate) trait Connection {
    fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> rusb::Result<usize>;

    fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> rusb::Result<usize>;
}

impl<T: UsbContext> Connection for DeviceHandle<T> {
    fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> rusb::Result<usize> {
        let req_type = {
            use rusb::constants::*;
            LIBUSB_REQUEST_TYPE_VENDOR | LIBUSB_RECIPIENT_INTERFACE | LIBUSB_ENDPOINT_IN
        };
        self.read_control(req_type, request, value, index, buf, TIMEOUT)
    }

    fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> rusb::Result<usize> {
        let req_type = {
            use rusb::constants::*;
            LIBUSB_REQUEST_TYPE_VENDOR | LIBUSB_RECIPIENT_INTERFACE | LIBUSB_ENDPOINT_OUT
        };
        self.write_control(req_type, request, value, index, data, TIMEOUT)
    }
}
