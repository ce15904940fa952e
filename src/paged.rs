//! Page-aligned EEPROM writes.
//!
//! A 24-series EEPROM latches at most one page per write cycle and wraps the
//! address pointer inside the page if more bytes arrive, so every transaction
//! has to stay within a single page. Each one is preceded by the device's
//! write-cycle recovery delay.

use std::time::Duration;

use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::debug;

use crate::{util::Frame, Error, SlaveAddress};

/// Write `data` starting at `base_address`.
///
/// While the cursor is not page-aligned a single byte is written per
/// transaction. Once aligned, whole pages are written; a remainder shorter
/// than a page goes out as a short final write.
///
/// The first failed transaction aborts the write. Bytes already accepted by
/// the device stay written.
pub fn write_paged<B, D>(
    bus: &mut B,
    delay: &mut D,
    slave: SlaveAddress,
    base_address: u16,
    data: &[u8],
    page_size: u16,
    write_delay: Duration,
) -> Result<(), Error>
where
    B: I2c,
    D: DelayNs,
{
    if !page_size.is_power_of_two() {
        return Err(Error::InvalidPageSize(page_size));
    }
    let page_mask = u32::from(page_size) - 1;
    let delay_us = u32::try_from(write_delay.as_micros()).unwrap_or(u32::MAX);

    let mut address = u32::from(base_address);
    let mut written = 0usize;
    while written < data.len() {
        delay.delay_us(delay_us);

        let chunk = if address & page_mask != 0 {
            1
        } else {
            usize::from(page_size).min(data.len() - written)
        };
        // Only the low 16 bits go on the wire.
        let frame = Frame::encode(address as u16, &data[written..written + chunk]);
        debug!(
            "EEPROM write {slave} @{:#06x} n:{}",
            address as u16,
            frame.payload_len()
        );
        bus.write(slave.get(), &frame.bytes)
            .map_err(Error::transport)?;

        address += chunk as u32;
        written += chunk;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    use super::*;
    use crate::testing::RecordingDelay;

    const SLAVE: u8 = 0x50;
    const DELAY: Duration = Duration::from_millis(10);

    fn slave() -> SlaveAddress {
        SlaveAddress::new(SLAVE).unwrap()
    }

    fn frame(address: u16, payload: &[u8]) -> Vec<u8> {
        Frame::encode(address, payload).bytes
    }

    #[test]
    fn full_buffer_goes_out_in_whole_pages() {
        let data: Vec<u8> = (0..=255).collect();
        let expectations: Vec<_> = data
            .chunks(32)
            .enumerate()
            .map(|(page, chunk)| Transaction::write(SLAVE, frame(page as u16 * 32, chunk)))
            .collect();
        assert_eq!(expectations.len(), 8);

        let mut bus = I2cMock::new(&expectations);
        let mut delay = RecordingDelay::default();
        write_paged(&mut bus, &mut delay, slave(), 0, &data, 32, DELAY).unwrap();
        bus.done();

        // One recovery delay ahead of every page.
        assert_eq!(delay.calls_us, vec![10_000; 8]);
    }

    #[test]
    fn pages_carry_address_header_plus_page() {
        let data = [0x5Au8; 64];
        let mut bus = I2cMock::new(&[
            Transaction::write(SLAVE, frame(0x0000, &data[..32])),
            Transaction::write(SLAVE, frame(0x0020, &data[32..])),
        ]);
        write_paged(&mut bus, &mut RecordingDelay::default(), slave(), 0, &data, 32, DELAY)
            .unwrap();
        bus.done();
        assert_eq!(frame(0x0000, &data[..32]).len(), 34);
    }

    #[test]
    fn unaligned_start_writes_single_bytes_until_aligned() {
        let data: Vec<u8> = (0..40).collect();
        let mut expectations = Vec::new();
        // 0x1D, 0x1E, 0x1F one at a time, then a page at 0x20, then the tail.
        for (i, address) in (0x1Du16..0x20).enumerate() {
            expectations.push(Transaction::write(SLAVE, frame(address, &data[i..=i])));
        }
        expectations.push(Transaction::write(SLAVE, frame(0x20, &data[3..35])));
        expectations.push(Transaction::write(SLAVE, frame(0x40, &data[35..])));

        let mut bus = I2cMock::new(&expectations);
        let mut delay = RecordingDelay::default();
        write_paged(&mut bus, &mut delay, slave(), 0x1D, &data, 32, DELAY).unwrap();
        bus.done();
        assert_eq!(delay.calls_us.len(), 5);
    }

    #[test]
    fn short_remainder_is_not_padded() {
        let data = [0xFFu8; 40];
        let mut bus = I2cMock::new(&[
            Transaction::write(SLAVE, frame(0x0000, &data[..32])),
            Transaction::write(SLAVE, frame(0x0020, &data[32..])),
        ]);
        write_paged(&mut bus, &mut RecordingDelay::default(), slave(), 0, &data, 32, DELAY)
            .unwrap();
        bus.done();
    }

    #[test]
    fn transport_failure_stops_the_write() {
        let data = [0u8; 96];
        let mut bus = I2cMock::new(&[
            Transaction::write(SLAVE, frame(0x0000, &data[..32])),
            Transaction::write(SLAVE, frame(0x0020, &data[32..64])).with_error(ErrorKind::Other),
        ]);
        let mut delay = RecordingDelay::default();
        let result = write_paged(&mut bus, &mut delay, slave(), 0, &data, 32, DELAY);
        // The third page is never attempted.
        bus.done();

        assert!(matches!(result, Err(Error::Io(_))), "{result:?}");
        assert_eq!(delay.calls_us.len(), 2);
    }

    #[test]
    fn empty_buffer_writes_nothing() {
        let mut bus = I2cMock::new(&[]);
        let mut delay = RecordingDelay::default();
        write_paged(&mut bus, &mut delay, slave(), 0, &[], 32, DELAY).unwrap();
        bus.done();
        assert!(delay.calls_us.is_empty());
    }

    #[test]
    fn rejects_page_sizes_that_cannot_be_masked() {
        let mut bus = I2cMock::new(&[]);
        for page_size in [0, 24] {
            let result = write_paged(
                &mut bus,
                &mut RecordingDelay::default(),
                slave(),
                0,
                &[1, 2, 3],
                page_size,
                DELAY,
            );
            assert!(matches!(result, Err(Error::InvalidPageSize(p)) if p == page_size));
        }
        bus.done();
    }
}
