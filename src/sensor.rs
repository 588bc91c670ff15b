use log::{debug, warn};

use crate::frame::{self, RawReading, FRAME_LEN};
use crate::transport::{send_and_poll, CMD_MEASURE_ONE_SHOT};
use crate::{Clock, DeviceAddress, Result, RetryPolicy, Status, ThreadClock, Transport};

/// One physical SHT3x sensor: runs one-shot measurements and keeps the last good reading.
///
/// The cached reading is only replaced when a measurement succeeds, so after a failed
/// [`Sht3x::update`] the previous values stay available next to the failure [`Status`].
pub struct Sht3x<T, C = ThreadClock> {
    transport: T,
    clock: C,
    policy: RetryPolicy,
    reading: RawReading,
    status: Status,
}

impl<T: Transport> Sht3x<T> {
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, RetryPolicy::default())
    }

    pub fn with_policy(transport: T, policy: RetryPolicy) -> Self {
        Self::with_clock(transport, ThreadClock, policy)
    }
}

impl<T: Transport, C: Clock> Sht3x<T, C> {
    pub fn with_clock(transport: T, clock: C, policy: RetryPolicy) -> Self {
        Self {
            transport,
            clock,
            policy,
            reading: RawReading::default(),
            status: Status::Ok,
        }
    }

    /// Triggers a measurement on the sensor at `address` and waits for the result.
    ///
    /// The outcome is recorded in [`Sht3x::status`] either way; the return value carries the
    /// same information for callers that prefer `?`.
    pub fn update(&mut self, address: DeviceAddress) -> Result<RawReading> {
        self.status = Status::Ok;
        let res = send_and_poll::<FRAME_LEN>(
            &mut self.transport,
            &mut self.clock,
            &self.policy,
            address,
            CMD_MEASURE_ONE_SHOT,
        )
        .map_err(Into::into)
        .and_then(|buf| frame::decode(&buf));

        match res {
            Ok(reading) => {
                debug!(
                    "{:#04x}: T raw {:#06x}, RH raw {:#06x}",
                    address.get(),
                    reading.temperature,
                    reading.humidity
                );
                self.reading = reading;
                Ok(reading)
            }
            Err(e) => {
                self.status = Status::from(&e);
                warn!(
                    "{:#04x}: measurement failed (status {}): {}",
                    address.get(),
                    self.status.code(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Outcome of the last [`Sht3x::update`]; [`Status::Ok`] if there was none yet.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn temperature_raw(&self) -> u16 {
        self.reading.temperature
    }

    #[inline]
    pub fn humidity_raw(&self) -> u16 {
        self.reading.humidity
    }

    #[inline]
    pub fn reading(&self) -> RawReading {
        self.reading
    }

    pub fn temperature_celsius(&self) -> f32 {
        self.reading.celsius()
    }

    pub fn humidity_percent(&self) -> f32 {
        self.reading.percent()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn release(self) -> T {
        self.transport
    }
}
