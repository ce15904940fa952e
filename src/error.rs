use embedded_hal::i2c::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no such I2C interface: {0}")]
    NoSuchInterface(u8),
    #[error("{0}")]
    Io(String),
    #[error("invalid I2C slave address: {0:?}")]
    InvalidAddress(String),
    #[error("I2C interface is not open")]
    NotOpen,
    #[error("I2C interface {0} is already open")]
    AlreadyOpen(u8),
    #[error("page size must be a non-zero power of two, got {0}")]
    InvalidPageSize(u16),
}

impl Error {
    /// Wrap a bus error, keeping the transport's own description.
    pub(crate) fn transport<E: embedded_hal::i2c::Error>(error: E) -> Self {
        Self::Io(format!("{error:?} ({})", describe(error.kind())))
    }
}

fn describe(kind: ErrorKind) -> &'static str {
    use embedded_hal::i2c::NoAcknowledgeSource;

    match kind {
        ErrorKind::Bus => "bus error",
        ErrorKind::ArbitrationLoss => "arbitration lost",
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => "address not acknowledged",
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => "data not acknowledged",
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => "not acknowledged",
        ErrorKind::Overrun => "overrun",
        _ => "transport failure",
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}
