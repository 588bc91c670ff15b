//! Layout of the 6 byte measurement response:
//! `[t_msb, t_lsb, t_crc, h_msb, h_lsb, h_crc]`.

use crate::{conversions, crc, Error, Result};

pub const FRAME_LEN: usize = 6;

/// Raw 16-bit words as delivered by the sensor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawReading {
    pub temperature: u16,
    pub humidity: u16,
}

impl RawReading {
    #[inline]
    pub fn celsius(&self) -> f32 {
        conversions::temperature_celsius(self.temperature)
    }

    #[inline]
    pub fn percent(&self) -> f32 {
        conversions::humidity_percent(self.humidity)
    }
}

/// Validates both checksums, temperature first, and extracts the two words.
pub fn decode(frame: &[u8; FRAME_LEN]) -> Result<RawReading> {
    crc::verify(&frame[0..2], frame[2]).map_err(Error::TemperatureChecksum)?;
    crc::verify(&frame[3..5], frame[5]).map_err(Error::HumidityChecksum)?;
    Ok(RawReading {
        temperature: u16::from_be_bytes([frame[0], frame[1]]),
        humidity: u16::from_be_bytes([frame[3], frame[4]]),
    })
}

/// Builds the frame a sensor would send for `reading`.
pub fn encode(reading: RawReading) -> [u8; FRAME_LEN] {
    let [t_msb, t_lsb] = reading.temperature.to_be_bytes();
    let [h_msb, h_lsb] = reading.humidity.to_be_bytes();
    [
        t_msb,
        t_lsb,
        crc::crc8(&[t_msb, t_lsb]),
        h_msb,
        h_lsb,
        crc::crc8(&[h_msb, h_lsb]),
    ]
}
