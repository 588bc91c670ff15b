//! CRC-8 used by Sensirion sensors to protect every 16-bit word they return.
//!
//! Polynomial 0x31 (x^8 + x^5 + x^4 + 1), initial value 0xFF, processed MSB first with no
//! reflection and no final XOR.

use crate::ChecksumMismatch;

const POLYNOMIAL: u8 = 0x31;
const INIT: u8 = 0xFF;

pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = INIT;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Checks `data` against the checksum byte that followed it in the frame.
pub fn verify(data: &[u8], expected: u8) -> Result<(), ChecksumMismatch> {
    let computed = crc8(data);
    if computed == expected {
        Ok(())
    } else {
        Err(ChecksumMismatch { expected, computed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_vectors() {
        assert_eq!(crc8(&[0xBE, 0xEF]), 0x92);
        assert_eq!(crc8(&[0x00]), 0xAC);
        assert_eq!(crc8(&[]), INIT);
    }

    #[test]
    fn test_verify_accepts_own_checksum() {
        let cases: [&[u8]; 4] = [&[0x00, 0x00], &[0x66, 0x66], &[0xFF, 0xFF], &[0x12]];
        for data in cases {
            assert_eq!(verify(data, crc8(data)), Ok(()));
        }
    }

    #[test]
    fn test_verify_detects_single_bit_flip() {
        for word in [0x0000u16, 0x0001, 0x621C, 0xBEEF, 0x8000, 0xFFFF] {
            let data = word.to_be_bytes();
            let good = crc8(&data);
            for bit in 0..8 {
                let err = verify(&data, good ^ (1 << bit)).unwrap_err();
                assert_eq!(err.computed, good);
                assert_eq!(err.expected, good ^ (1 << bit));
            }
        }
    }

    #[test]
    fn test_verify_detects_data_corruption() {
        let crc = crc8(&[0xBE, 0xEF]);
        assert!(verify(&[0xBE, 0xEE], crc).is_err());
        assert!(verify(&[0xEF, 0xBE], crc).is_err());
    }
}
