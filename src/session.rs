use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::{
    dump::{self, Row},
    paged, BusProvider, Error, Handle, SlaveAddress,
};

/// Layout of the EEPROM being driven. Defaults match a 24C02-class part
/// with 32-byte pages.
#[derive(Debug, Clone, bon::Builder)]
pub struct Geometry {
    /// Bytes read, written or erased per operation.
    #[builder(default = 256)]
    pub total_bytes: usize,
    #[builder(default = 32)]
    pub page_size: u16,
    /// Bytes per dump row.
    #[builder(default = 8)]
    pub row_width: usize,
    #[builder(default = 0x0000)]
    pub base_address: u16,
    /// Write-cycle recovery time waited before every page write.
    #[builder(default = Duration::from_millis(10))]
    pub write_delay: Duration,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Caller-owned state for one EEPROM: the bus provider, the open handle (if
/// any) and the rows from the last read.
pub struct Session<P: BusProvider, D> {
    provider: P,
    delay: D,
    geometry: Geometry,
    handle: Option<Handle<P::Bus>>,
    rows: Vec<Row>,
}

impl<P, D> Session<P, D>
where
    P: BusProvider,
    D: DelayNs,
{
    pub fn new(provider: P, delay: D, geometry: Geometry) -> Self {
        let rows = dump::blank_rows(geometry.total_bytes, geometry.row_width);
        Self {
            provider,
            delay,
            geometry,
            handle: None,
            rows,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn interfaces(&self) -> Result<Vec<u8>, Error> {
        self.provider.interfaces()
    }

    /// Validate `slave` and open bus `bus_id`.
    pub fn open(&mut self, bus_id: u8, slave: &str) -> Result<(), Error> {
        let slave: SlaveAddress = slave.parse()?;
        if let Some(handle) = &self.handle {
            return Err(Error::AlreadyOpen(handle.bus_id()));
        }
        let bus = self.provider.open(bus_id)?;
        info!("Opened I2C interface {bus_id} for slave {slave}");
        self.handle = Some(Handle::new(bus_id, slave, bus));
        Ok(())
    }

    /// Closing a session that is not open does nothing.
    pub fn close(&mut self) -> Result<(), Error> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let bus_id = handle.bus_id();
        self.provider.close(handle.into_bus()).inspect_err(|e| {
            warn!("Closing I2C interface {bus_id} failed: {e}");
        })?;
        info!("Closed I2C interface {bus_id}");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&Handle<P::Bus>> {
        self.handle.as_ref()
    }

    /// Rows from the last successful read, blank before the first one.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Read the configured window and replace the stored rows.
    pub fn read(&mut self) -> Result<&[Row], Error> {
        let handle = self.handle.as_mut().ok_or(Error::NotOpen)?;
        let slave = handle.slave();
        let Geometry {
            total_bytes,
            row_width,
            base_address,
            ..
        } = self.geometry;
        self.rows = dump::read_dump(&mut handle.bus, slave, base_address, total_bytes, row_width)?;
        info!("Read {total_bytes} bytes from {slave}");
        Ok(&self.rows)
    }

    /// Write `data` from the base address, one page at a time.
    pub fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        let handle = self.handle.as_mut().ok_or(Error::NotOpen)?;
        let slave = handle.slave();
        paged::write_paged(
            &mut handle.bus,
            &mut self.delay,
            slave,
            self.geometry.base_address,
            data,
            self.geometry.page_size,
            self.geometry.write_delay,
        )?;
        info!("Wrote {} bytes to {slave}", data.len());
        Ok(())
    }

    /// Write the ramp `0, 1, 2, ...` over the whole window.
    pub fn write_test_pattern(&mut self) -> Result<(), Error> {
        let data = test_pattern(self.geometry.total_bytes);
        self.write(&data)
    }

    /// Fill the whole window with `0xFF`.
    pub fn erase(&mut self) -> Result<(), Error> {
        let data = vec![0xFF; self.geometry.total_bytes];
        self.write(&data)
    }
}

pub fn test_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}
