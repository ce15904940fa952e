use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// A write transaction: the 2-byte word address followed by its payload.
pub(crate) struct Frame {
    pub(crate) bytes: Vec<u8>,
}

impl Frame {
    pub(crate) fn encode(address: u16, payload: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(payload.len() + 2);
        // High byte first.
        bytes.extend_from_slice(&address.to_be_bytes());
        bytes.extend_from_slice(payload);
        Self { bytes }
    }

    /// Header only, used to move the device's read pointer.
    pub(crate) fn address_only(address: u16) -> Self {
        Self::encode(address, &[])
    }

    pub(crate) fn payload_len(&self) -> usize {
        self.bytes.len() - 2
    }
}

/// Blocking delay for hosts where stalling the calling thread is acceptable.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl DelayNs for ThreadSleep {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }
}
