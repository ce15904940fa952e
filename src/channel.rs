use embedded_hal::i2c::I2c;

use crate::{Error, SlaveAddress};

/// Source of I2C buses, addressed by bus number.
pub trait BusProvider {
    type Bus: I2c;

    /// Bus numbers that can be opened, in ascending order.
    fn interfaces(&self) -> Result<Vec<u8>, Error>;

    /// Fails with [`Error::NoSuchInterface`] if `bus_id` does not exist.
    fn open(&mut self, bus_id: u8) -> Result<Self::Bus, Error>;

    fn close(&mut self, bus: Self::Bus) -> Result<(), Error>;
}

/// An open bus together with the slave it talks to.
#[derive(Debug)]
pub struct Handle<B> {
    bus_id: u8,
    slave: SlaveAddress,
    pub(crate) bus: B,
}

impl<B: I2c> Handle<B> {
    pub(crate) fn new(bus_id: u8, slave: SlaveAddress, bus: B) -> Self {
        Self { bus_id, slave, bus }
    }

    pub fn bus_id(&self) -> u8 {
        self.bus_id
    }

    pub fn slave(&self) -> SlaveAddress {
        self.slave
    }

    pub(crate) fn into_bus(self) -> B {
        self.bus
    }
}
