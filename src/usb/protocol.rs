use super::connection::Connection;
use crate::UsbError;

// i2c-tiny-usb and compatible devices can use multiple USB VID+PID combinations
pub const KNOWN_VENDOR_PRODUCT_IDS: [(u16, u16); 2] = [
    (0x0403, 0xc631), // FTDI
    (0x1c40, 0x0534), // EZPrototypes
];

const CMD_GET_FUNC: u8 = 1;
const CMD_GET_STATUS: u8 = 3;
const CMD_I2C_IO: u8 = 4;
// OR'd with CMD_I2C_IO; a lone message is both the first and the last of its transaction
const CMD_I2C_BEGIN: u8 = 1;
const CMD_I2C_END: u8 = 2;
const CMD_I2C_SINGLE: u8 = CMD_I2C_IO | CMD_I2C_BEGIN | CMD_I2C_END;

const STATUS_ADDRESS_NAK: u8 = 2;

const I2C_FUNC_I2C: u32 = 0x00000001;

// wValue flag of every read message
const I2C_M_RD: u16 = 0x0001;

type Result<T> = std::result::Result<T, UsbError>;

fn control_in_exact(
    dev: &impl Connection,
    request: u8,
    value: u16,
    index: u16,
    buf: &mut [u8],
) -> Result<()> {
    if dev.control_in(request, value, index, buf)? != buf.len() {
        return Err(rusb::Error::Io.into());
    }
    Ok(())
}

/// Reports a NACK from the adapter's status register in preference to the transfer error,
/// since a NACKed address usually also fails the USB transfer itself.
fn finish(dev: &impl Connection, op_result: Result<()>) -> Result<()> {
    let mut status = [0u8; 1];
    control_in_exact(dev, CMD_GET_STATUS, I2C_M_RD, 0, &mut status)?;
    if status[0] == STATUS_ADDRESS_NAK {
        return Err(UsbError::Nack);
    }
    op_result
}

/// Writes `data` to the 7-bit `address` as one complete I2C transaction.
pub(crate) fn write(dev: &impl Connection, address: u16, data: &[u8]) -> Result<()> {
    let op_result = match dev.control_out(CMD_I2C_SINGLE, 0, address, data) {
        Ok(n) if n == data.len() => Ok(()),
        Ok(_) => Err(rusb::Error::Io.into()),
        Err(e) => Err(e.into()),
    };
    finish(dev, op_result)
}

/// Fills `buf` from the 7-bit `address` as one complete I2C transaction.
pub(crate) fn read(dev: &impl Connection, address: u16, buf: &mut [u8]) -> Result<()> {
    let op_result = control_in_exact(dev, CMD_I2C_SINGLE, I2C_M_RD, address, buf);
    finish(dev, op_result)
}

/// Makes sure the adapter can perform plain I2C transfers.
pub(crate) fn check_device(dev: &impl Connection) -> Result<()> {
    let mut buf_func = [0u8; 4];
    control_in_exact(dev, CMD_GET_FUNC, I2C_M_RD, 0, &mut buf_func)?;
    let func = u32::from_le_bytes(buf_func);
    if func & I2C_FUNC_I2C == 0 {
        return Err(rusb::Error::NotSupported.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usb::connection::mock::{MockConnection, Transfer};

    const STATUS_IDLE: u8 = 0;
    const STATUS_ADDRESS_ACK: u8 = 1;

    #[test]
    fn test_check_device() {
        let dev = MockConnection::new();
        dev.respond(&[0x05, 0x00, 0x00, 0x00]);
        check_device(&dev).unwrap();
    }

    #[test]
    fn test_check_device_without_i2c() {
        let dev = MockConnection::new();
        dev.respond(&[0x04, 0x00, 0x00, 0x00]);
        assert_eq!(
            check_device(&dev),
            Err(UsbError::Usb(rusb::Error::NotSupported))
        );
    }

    #[test]
    fn test_failed_check() {
        let dev = MockConnection::new();
        assert!(check_device(&dev).is_err());
    }

    #[test]
    fn test_write_command() {
        let dev = MockConnection::new();
        dev.respond(&[STATUS_ADDRESS_ACK]);

        write(&dev, 0x44, &[0x2C, 0x06]).unwrap();
        assert_eq!(
            dev.transfers(),
            vec![
                Transfer::Out {
                    request: CMD_I2C_SINGLE,
                    value: 0,
                    index: 0x44,
                    data: vec![0x2C, 0x06],
                },
                Transfer::In {
                    request: CMD_GET_STATUS,
                    value: I2C_M_RD,
                    index: 0,
                },
            ]
        );
    }

    #[test]
    fn test_read_frame() {
        let dev = MockConnection::new();
        dev.respond(&[0x62, 0x1C, 0x33, 0xBE, 0xEF, 0x92]);
        dev.respond(&[STATUS_IDLE]);

        let mut buf = [0u8; 6];
        read(&dev, 0x45, &mut buf).unwrap();
        assert_eq!(buf, [0x62, 0x1C, 0x33, 0xBE, 0xEF, 0x92]);
        assert_eq!(
            dev.transfers()[0],
            Transfer::In {
                request: CMD_I2C_SINGLE,
                value: I2C_M_RD,
                index: 0x45,
            }
        );
    }

    #[test]
    fn test_nack_takes_precedence() {
        let dev = MockConnection::new();
        dev.respond_err(rusb::Error::Pipe);
        dev.respond(&[STATUS_ADDRESS_NAK]);

        let mut buf = [0u8; 6];
        assert_eq!(read(&dev, 0x44, &mut buf), Err(UsbError::Nack));
    }

    #[test]
    fn test_short_read() {
        let dev = MockConnection::new();
        dev.respond(&[0x62, 0x1C]);
        dev.respond(&[STATUS_IDLE]);

        let mut buf = [0u8; 6];
        assert_eq!(
            read(&dev, 0x44, &mut buf),
            Err(UsbError::Usb(rusb::Error::Io))
        );
    }

    #[test]
    fn test_failed_write_without_nack() {
        let dev = MockConnection::new();
        *dev.fail_out.borrow_mut() = Some(rusb::Error::Timeout);
        dev.respond(&[STATUS_IDLE]);

        assert_eq!(
            write(&dev, 0x44, &[0x2C, 0x06]),
            Err(UsbError::Usb(rusb::Error::Timeout))
        );
    }
}
