use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A 7-bit I2C slave address, entered as one or two hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlaveAddress(u8);

impl SlaveAddress {
    pub const MAX: u8 = 0x7F;

    pub fn new(address: u8) -> Result<Self, Error> {
        if address > Self::MAX {
            return Err(Error::InvalidAddress(format!("{address:#04x}")));
        }
        Ok(Self(address))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for SlaveAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAddress(s.to_owned());
        if !matches!(s.len(), 1..=2) || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u8::from_str_radix(s, 16).map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }
}

impl fmt::Display for SlaveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
