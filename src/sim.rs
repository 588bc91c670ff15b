//! Host-side stand-in for an SHT3x, for running the driver without hardware.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::conversions::{humidity_raw_from_percent, temperature_raw_from_celsius};
use crate::frame::{self, RawReading};
use crate::transport::CMD_MEASURE_ONE_SHOT;
use crate::{Bus, DeviceAddress, Transport};

#[derive(Debug)]
struct State {
    address: DeviceAddress,
    reading: RawReading,
    busy_reads: usize,
    pending: bool,
    busy_left: usize,
    writes: usize,
    read_attempts: usize,
}

/// Simulated sensor answering at a single address.
///
/// Clones share the same device, so one clone can be handed to [`crate::Sht3x`] while another
/// one adjusts the reading or inspects the traffic.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    state: Rc<RefCell<State>>,
}

pub struct SimulatedBus {
    state: Rc<RefCell<State>>,
}

impl SimulatedSensor {
    /// A sensor at `address` reporting 30°C and 50%RH.
    pub fn new(address: DeviceAddress) -> Self {
        let reading = RawReading {
            temperature: temperature_raw_from_celsius(30.0),
            humidity: humidity_raw_from_percent(50.0),
        };
        Self {
            state: Rc::new(RefCell::new(State {
                address,
                reading,
                busy_reads: 0,
                pending: false,
                busy_left: 0,
                writes: 0,
                read_attempts: 0,
            })),
        }
    }

    /// Number of reads NACKed after each measurement command, as if still converting.
    pub fn with_busy_reads(self, busy_reads: usize) -> Self {
        self.state.borrow_mut().busy_reads = busy_reads;
        self
    }

    pub fn set_reading(&self, reading: RawReading) {
        self.state.borrow_mut().reading = reading;
    }

    pub fn set_physical(&self, celsius: f32, percent: f32) {
        self.set_reading(RawReading {
            temperature: temperature_raw_from_celsius(celsius),
            humidity: humidity_raw_from_percent(percent),
        });
    }

    pub fn reading(&self) -> RawReading {
        self.state.borrow().reading
    }

    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    pub fn read_attempts(&self) -> usize {
        self.state.borrow().read_attempts
    }
}

impl Transport for SimulatedSensor {
    type Bus = SimulatedBus;

    fn acquire(&mut self) -> io::Result<SimulatedBus> {
        Ok(SimulatedBus {
            state: self.state.clone(),
        })
    }
}

impl Bus for SimulatedBus {
    fn write(&mut self, address: DeviceAddress, data: &[u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        if address != state.address {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "no device at this address",
            ));
        }
        if data != CMD_MEASURE_ONE_SHOT.to_be_bytes() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "unsupported command",
            ));
        }
        state.pending = true;
        state.busy_left = state.busy_reads;
        Ok(())
    }

    fn read(&mut self, address: DeviceAddress, buf: &mut [u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.read_attempts += 1;
        if address != state.address || !state.pending {
            return Err(io::ErrorKind::NotConnected.into());
        }
        if state.busy_left > 0 {
            state.busy_left -= 1;
            return Err(io::ErrorKind::WouldBlock.into());
        }
        let frame = frame::encode(state.reading);
        if buf.len() > frame.len() {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        buf.copy_from_slice(&frame[..buf.len()]);
        state.pending = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::RecordingClock;
    use crate::{RetryPolicy, Sht3x, Status};

    fn driver(sim: &SimulatedSensor) -> Sht3x<SimulatedSensor, RecordingClock> {
        Sht3x::with_clock(
            sim.clone(),
            RecordingClock::default(),
            RetryPolicy::default(),
        )
    }

    #[test]
    fn test_default_reading() {
        let sim = SimulatedSensor::new(DeviceAddress::A0);
        let mut sht = driver(&sim);
        sht.update(DeviceAddress::A0).unwrap();
        assert!((sht.temperature_celsius() - 30.0).abs() < 0.01);
        assert!((sht.humidity_percent() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_busy_reads_absorbed_by_retries() {
        let sim = SimulatedSensor::new(DeviceAddress::A1).with_busy_reads(3);
        let mut sht = driver(&sim);
        sht.update(DeviceAddress::A1).unwrap();
        assert_eq!(sim.read_attempts(), 4);
        assert_eq!(sht.reading(), sim.reading());
    }

    #[test]
    fn test_too_busy() {
        let sim = SimulatedSensor::new(DeviceAddress::A0).with_busy_reads(4);
        let mut sht = driver(&sim);
        sht.update(DeviceAddress::A0).unwrap_err();
        assert_eq!(sht.status(), Status::ReadFailed);
    }

    #[test]
    fn test_wrong_address_nacks_write() {
        let sim = SimulatedSensor::new(DeviceAddress::A0);
        let mut sht = driver(&sim);
        sht.update(DeviceAddress::A1).unwrap_err();
        assert_eq!(sht.status(), Status::WriteFailed);
        assert_eq!(sim.read_attempts(), 0);
    }

    #[test]
    fn test_reading_follows_device() {
        let sim = SimulatedSensor::new(DeviceAddress::A0);
        let mut sht = driver(&sim);
        sim.set_physical(-10.0, 85.0);
        sht.update(DeviceAddress::A0).unwrap();
        assert!((sht.temperature_celsius() + 10.0).abs() < 0.01);
        assert!((sht.humidity_percent() - 85.0).abs() < 0.01);
        assert_eq!(sim.writes(), 1);
    }
}
