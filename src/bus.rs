use std::io::{self, Read, Write};
use std::time::Duration;

/// 8-bit bus address of a sensor: the 7-bit I2C address shifted left by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// ADDR pin tied low.
    pub const A0: DeviceAddress = DeviceAddress(0x44 << 1);
    /// ADDR pin tied high.
    pub const A1: DeviceAddress = DeviceAddress(0x45 << 1);

    #[inline]
    pub const fn new(address: u8) -> Self {
        Self(address)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The address as host I2C APIs expect it, without the R/W bit position.
    #[inline]
    pub const fn seven_bit(self) -> u16 {
        (self.0 >> 1) as u16
    }
}

/// One acquired I2C bus handle. Used by `crate::transport` for a single command-then-read
/// transaction and dropped afterwards.
pub trait Bus {
    fn write(&mut self, address: DeviceAddress, data: &[u8]) -> io::Result<()>;

    /// Fills all of `buf` or fails; partial reads count as failures.
    fn read(&mut self, address: DeviceAddress, buf: &mut [u8]) -> io::Result<()>;
}

// Any host adapter speaking the `i2c` crate's traits can carry the transaction. Each call maps
// to exactly one bus transfer: `write_all`/`read_exact` would silently repeat transfers on
// `Interrupted` and on short counts, which the polling schedule in `crate::transport` owns.
impl<T> Bus for T
where
    T: i2c::Address + Read + Write,
    <T as i2c::Master>::Error: Into<io::Error>,
{
    fn write(&mut self, address: DeviceAddress, data: &[u8]) -> io::Result<()> {
        self.set_slave_address(address.seven_bit(), false)
            .map_err(Into::<io::Error>::into)?;
        if Write::write(self, data)? != data.len() {
            return Err(io::ErrorKind::WriteZero.into());
        }
        Ok(())
    }

    fn read(&mut self, address: DeviceAddress, buf: &mut [u8]) -> io::Result<()> {
        self.set_slave_address(address.seven_bit(), false)
            .map_err(Into::<io::Error>::into)?;
        if Read::read(self, buf)? != buf.len() {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        Ok(())
    }
}

/// Source of bus handles. A fresh handle is acquired for every transaction so that nothing
/// about a previous call (address, adapter state) leaks into the next one.
pub trait Transport {
    type Bus: Bus;

    fn acquire(&mut self) -> io::Result<Self::Bus>;
}

/// Blocking delay primitive used while waiting for a conversion.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// [`Clock`] backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    #[inline]
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration)
    }
}
