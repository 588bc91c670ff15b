use std::io;

/// Failure of a single command-then-read transaction with the sensor.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// The command could not be sent. Also covers failing to open the bus.
    #[error("failed to send command to the sensor")]
    Write(#[source] io::Error),

    #[error("sensor did not answer within {attempts} read attempts")]
    Read {
        attempts: u8,
        #[source]
        source: io::Error,
    },
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("checksum mismatch: frame carries {expected:#04x}, data hashes to {computed:#04x}")]
pub struct ChecksumMismatch {
    pub expected: u8,
    pub computed: u8,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("temperature field failed validation")]
    TemperatureChecksum(#[source] ChecksumMismatch),

    #[error("humidity field failed validation")]
    HumidityChecksum(#[source] ChecksumMismatch),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of the most recent [`crate::Sht3x::update`] call.
///
/// The discriminants are the numeric codes exposed through [`Status::code`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    #[default]
    Ok = 0,
    WriteFailed = 1,
    ReadFailed = 2,
    TemperatureChecksum = 3,
    HumidityChecksum = 4,
}

impl Status {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl From<&Error> for Status {
    fn from(value: &Error) -> Self {
        match value {
            Error::Transport(TransportError::Write(_)) => Status::WriteFailed,
            Error::Transport(TransportError::Read { .. }) => Status::ReadFailed,
            Error::TemperatureChecksum(_) => Status::TemperatureChecksum,
            Error::HumidityChecksum(_) => Status::HumidityChecksum,
        }
    }
}

/// Errors of the i2c-tiny-usb host transport.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum UsbError {
    #[error("USB error")]
    Usb(#[from] rusb::Error),

    #[error("no acknowledgement from the i2c device")]
    Nack,
}

impl From<UsbError> for io::Error {
    fn from(value: UsbError) -> Self {
        use io::ErrorKind;
        let kind = match &value {
            UsbError::Usb(rusb::Error::InvalidParam | rusb::Error::NotSupported) => {
                ErrorKind::InvalidInput
            }
            UsbError::Usb(rusb::Error::Access) => ErrorKind::PermissionDenied,
            UsbError::Usb(rusb::Error::NoDevice) => ErrorKind::NotFound,
            UsbError::Usb(rusb::Error::Busy) => ErrorKind::ResourceBusy,
            UsbError::Usb(rusb::Error::Timeout) => ErrorKind::TimedOut,
            UsbError::Usb(rusb::Error::Pipe) => ErrorKind::BrokenPipe,
            UsbError::Usb(rusb::Error::Interrupted) => ErrorKind::Interrupted,
            UsbError::Usb(_) => ErrorKind::Other,
            // a sensor that is still converting NACKs its address
            UsbError::Nack => ErrorKind::WouldBlock,
        };
        io::Error::new(kind, value)
    }
}
