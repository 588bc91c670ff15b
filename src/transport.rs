use log::debug;

use crate::{Bus, Clock, DeviceAddress, RetryPolicy, Transport, TransportError};

/// One-shot measurement, high repeatability, clock stretching enabled.
pub const CMD_MEASURE_ONE_SHOT: u16 = 0x2C06;

/// Sends `command` to the sensor at `address` and polls for an `N` byte response.
///
/// A failed write is reported immediately. Failed reads are expected while the sensor is still
/// converting (it stretches the clock or NACKs its address), so they are retried according to
/// `policy` and only reported once every attempt has failed.
pub fn send_and_poll<const N: usize>(
    transport: &mut impl Transport,
    clock: &mut impl Clock,
    policy: &RetryPolicy,
    address: DeviceAddress,
    command: u16,
) -> Result<[u8; N], TransportError> {
    let mut bus = transport.acquire().map_err(TransportError::Write)?;

    bus.write(address, &command.to_be_bytes())
        .map_err(TransportError::Write)?;
    clock.sleep(policy.settle_delay());

    let attempts = policy.attempts();
    let mut buf = [0u8; N];
    let mut attempt = 1;
    loop {
        match bus.read(address, &mut buf) {
            Ok(()) => return Ok(buf),
            Err(source) if attempt >= attempts => {
                debug!(
                    "no response from {:#04x} after {} attempts: {}",
                    address.get(),
                    attempts,
                    source
                );
                return Err(TransportError::Read { attempts, source });
            }
            Err(e) => {
                debug!(
                    "read attempt {}/{} at {:#04x} failed: {}",
                    attempt,
                    attempts,
                    address.get(),
                    e
                );
            }
        }
        clock.sleep(policy.retry_delay());
        attempt += 1;
    }
}
