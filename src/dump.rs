//! Reading the EEPROM back and rendering it as a hex/ASCII table.

use std::fmt;

use embedded_hal::i2c::I2c;
use log::debug;

use crate::{util::Frame, Error, SlaveAddress};

/// One line of the dump table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    offset: usize,
    bytes: Option<Vec<u8>>,
}

impl Row {
    pub fn new(offset: usize, bytes: Vec<u8>) -> Self {
        Self {
            offset,
            bytes: Some(bytes),
        }
    }

    /// A row that has not been read yet.
    pub fn blank(offset: usize) -> Self {
        Self {
            offset,
            bytes: None,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Decimal offset, zero-padded to at least three digits: `"008 | "`.
    pub fn offset_string(&self) -> String {
        format!("{:03} | ", self.offset)
    }

    /// `"00 01 0A FF |"`, or empty for a blank row.
    pub fn hex_string(&self) -> String {
        let Some(bytes) = &self.bytes else {
            return String::new();
        };
        let mut out: String = bytes.iter().map(|byte| format!("{byte:02X} ")).collect();
        out.push('|');
        out
    }

    /// The bytes decoded as UTF-8. Control characters pass through as is,
    /// invalid sequences become U+FFFD.
    pub fn ascii_string(&self) -> String {
        let bytes = self.bytes.as_deref().unwrap_or_default();
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.offset_string(),
            self.hex_string(),
            self.ascii_string()
        )
    }
}

/// Split a read-back buffer into rows of `row_width` bytes. Offsets count
/// from the start of the buffer. A trailing partial row is kept as is.
pub fn to_rows(data: &[u8], row_width: usize) -> Vec<Row> {
    let row_width = row_width.max(1);
    data.chunks(row_width)
        .enumerate()
        .map(|(i, chunk)| Row::new(i * row_width, chunk.to_vec()))
        .collect()
}

/// Rows shown before anything has been read.
pub fn blank_rows(total_bytes: usize, row_width: usize) -> Vec<Row> {
    let row_width = row_width.max(1);
    (0..total_bytes.div_ceil(row_width))
        .map(|i| Row::blank(i * row_width))
        .collect()
}

/// Set the read pointer to `base_address` and read `total_bytes` in one go.
pub fn read_memory<B: I2c>(
    bus: &mut B,
    slave: SlaveAddress,
    base_address: u16,
    total_bytes: usize,
) -> Result<Vec<u8>, Error> {
    debug!("EEPROM read {slave} @{base_address:#06x} n:{total_bytes}");
    bus.write(slave.get(), &Frame::address_only(base_address).bytes)
        .map_err(Error::transport)?;
    let mut data = vec![0u8; total_bytes];
    bus.read(slave.get(), &mut data)
        .map_err(Error::transport)?;
    Ok(data)
}

/// [`read_memory`] followed by [`to_rows`].
pub fn read_dump<B: I2c>(
    bus: &mut B,
    slave: SlaveAddress,
    base_address: u16,
    total_bytes: usize,
    row_width: usize,
) -> Result<Vec<Row>, Error> {
    let data = read_memory(bus, slave, base_address, total_bytes)?;
    Ok(to_rows(&data, row_width))
}
