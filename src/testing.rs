//! Test doubles shared by the unit tests.

use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::i2c::Mock as I2cMock;

use crate::{BusProvider, Error};

/// Records every requested delay in microseconds instead of sleeping.
#[derive(Debug, Default)]
pub(crate) struct RecordingDelay {
    pub(crate) calls_us: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls_us.push(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.calls_us.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_us.push(ms.saturating_mul(1_000));
    }
}

/// A single bus backed by an `embedded-hal-mock` I2C mock.
pub(crate) struct MockProvider {
    bus_id: u8,
    bus: I2cMock,
    pub(crate) opened: usize,
    pub(crate) closed: usize,
}

impl MockProvider {
    pub(crate) fn new(bus_id: u8, bus: I2cMock) -> Self {
        Self {
            bus_id,
            bus,
            opened: 0,
            closed: 0,
        }
    }
}

impl BusProvider for MockProvider {
    type Bus = I2cMock;

    fn interfaces(&self) -> Result<Vec<u8>, Error> {
        Ok(vec![self.bus_id])
    }

    fn open(&mut self, bus_id: u8) -> Result<Self::Bus, Error> {
        if bus_id != self.bus_id {
            return Err(Error::NoSuchInterface(bus_id));
        }
        self.opened += 1;
        Ok(self.bus.clone())
    }

    fn close(&mut self, _bus: Self::Bus) -> Result<(), Error> {
        self.closed += 1;
        Ok(())
    }
}
