//! Read, write and erase 24-series I2C EEPROMs.
//!
//! Any [`embedded_hal::i2c::I2c`] bus works as the transport. Buses are
//! obtained through a [`BusProvider`]; on Linux [`LinuxBusProvider`] opens
//! `/dev/i2c-N`. [`Session`] ties a provider, a pacing delay and the EEPROM
//! [`Geometry`] together.

mod address;
mod channel;
pub mod dump;
mod error;
#[cfg(target_os = "linux")]
mod linux;
pub mod paged;
mod session;
#[cfg(test)]
mod testing;
mod util;

pub use address::SlaveAddress;
pub use channel::{BusProvider, Handle};
pub use dump::{read_dump, Row};
pub use error::Error;
#[cfg(target_os = "linux")]
pub use linux::LinuxBusProvider;
pub use paged::write_paged;
pub use session::{test_pattern, Geometry, Session};
pub use util::ThreadSleep;
