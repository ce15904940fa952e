//! `/dev/i2c-N` buses through the kernel's i2c-dev interface.

use std::path::{Path, PathBuf};

use linux_embedded_hal::I2cdev;
use log::{debug, info};

use crate::{BusProvider, Error};

const DEFAULT_DEV_ROOT: &str = "/dev";

#[derive(Debug, Clone)]
pub struct LinuxBusProvider {
    dev_root: PathBuf,
}

impl Default for LinuxBusProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DEV_ROOT)
    }
}

impl LinuxBusProvider {
    pub fn new(dev_root: impl Into<PathBuf>) -> Self {
        Self {
            dev_root: dev_root.into(),
        }
    }

    fn device_path(&self, bus_id: u8) -> PathBuf {
        self.dev_root.join(format!("i2c-{bus_id}"))
    }
}

/// `i2c-3` -> `Some(3)`.
fn parse_bus_id(file_name: &str) -> Option<u8> {
    file_name.strip_prefix("i2c-")?.parse().ok()
}

fn scan(dev_root: &Path) -> Result<Vec<u8>, Error> {
    let mut ids = Vec::new();
    for entry in std::fs::read_dir(dev_root)? {
        let entry = entry?;
        if let Some(id) = entry.file_name().to_str().and_then(parse_bus_id) {
            ids.push(id);
        }
    }
    ids.sort_unstable();
    Ok(ids)
}

impl BusProvider for LinuxBusProvider {
    type Bus = I2cdev;

    fn interfaces(&self) -> Result<Vec<u8>, Error> {
        let ids = scan(&self.dev_root)?;
        debug!("Found I2C interfaces {ids:?} in {}", self.dev_root.display());
        Ok(ids)
    }

    fn open(&mut self, bus_id: u8) -> Result<Self::Bus, Error> {
        let path = self.device_path(bus_id);
        if !path.exists() {
            return Err(Error::NoSuchInterface(bus_id));
        }
        info!("Opening {}", path.display());
        I2cdev::new(&path).map_err(|e| Error::Io(e.to_string()))
    }

    fn close(&mut self, bus: Self::Bus) -> Result<(), Error> {
        // The device file is closed on drop.
        drop(bus);
        Ok(())
    }
}
